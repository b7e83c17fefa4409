//! Retrieval evaluation: per-query scores and corpus-level reports.
//!
//! # Overview
//!
//! Given a set of queries, each with top-K retrieved chunk spans and
//! ground-truth reference spans over the same document, this module
//! computes three token-level metrics as percentages in [0, 100]:
//!
//! - **Recall**: fraction of reference tokens covered by retrieved spans
//! - **Precision**: fraction of retrieved tokens inside reference spans
//! - **IoU**: intersection over union of the two coverages
//!
//! [`score_query`] produces one [`QueryScores`] triple; [`score_corpus`]
//! runs a whole query set and aggregates mean and population standard
//! deviation per metric into a [`CorpusReport`].
//!
//! # Example
//!
//! ```rust
//! use spancov::{score_query, Query, Span};
//!
//! let query = Query {
//!     id: "q1".into(),
//!     text: "what did the speaker say about chips?".into(),
//!     retrieved: vec![Span::new(5, 15)?],
//!     references: vec![Span::new(0, 10)?],
//! };
//!
//! let scores = score_query(&query, 5)?;
//! assert_eq!(scores.recall, 50.0);
//! assert_eq!(scores.precision, 50.0);
//! # Ok::<(), spancov::Error>(())
//! ```
//!
//! # Known Metric Quirk
//!
//! The recall and precision denominators are plain length sums, not unioned
//! coverage: references that overlap each other (or retrieved chunks that
//! overlap each other) are counted once per span. The true-positive
//! numerator IS unioned. This asymmetry is the original metric definition
//! and is kept for comparability; see [`score_query`].

mod metrics;
mod report;

pub use metrics::{score_query, Query, QueryScores};
pub use report::{score_corpus, CorpusReport, FailurePolicy, MetricSummary};

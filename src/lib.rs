//! # spancov
//!
//! Token-span coverage metrics for retrieval evaluation.
//!
//! A retrieval pipeline returns text chunks; human annotators mark the
//! passages that actually answer each query. When both sides are expressed
//! as integer spans over the same document, "how good was the retrieval"
//! becomes interval arithmetic. spancov is that arithmetic:
//!
//! - **Span algebra** ([`span`]): intersection, overlap-merging union,
//!   interval difference, length sums
//! - **Metrics** ([`eval`]): per-query recall / precision / IoU as
//!   percentages, plus corpus-level mean ± population std
//! - **Location** ([`locate`]): first-occurrence substring fallback for
//!   pipelines that lost their chunk offsets
//!
//! Chunking, embeddings, nearest-neighbor search, and dataset loading are
//! external collaborators: they hand this crate already-positioned spans
//! and a result cutoff, and get numbers back.
//!
//! ## Quick Start
//!
//! ```rust
//! use spancov::{score_corpus, FailurePolicy, Query, Span};
//!
//! let queries = vec![Query {
//!     id: "q1".into(),
//!     text: "what did the speaker announce?".into(),
//!     retrieved: vec![Span::new(5, 15)?, Span::new(40, 60)?],
//!     references: vec![Span::new(0, 10)?],
//! }];
//!
//! let report = score_corpus(&queries, 5, FailurePolicy::Skip)?;
//! println!("{report}");
//! // Recall: 50.00 ± 0.00
//! // Precision: 16.67 ± 0.00
//! // IoU: 14.29 ± 0.00
//! # Ok::<(), spancov::Error>(())
//! ```
//!
//! ## Design Philosophy
//!
//! - **Parse, don't validate**: [`Span`] enforces `start <= end` at
//!   construction; everything downstream relies on the invariant
//! - **Errors, not NaN**: zero-length reference or retrieved sets surface
//!   as per-query [`Error`] variants the batch can skip or abort on,
//!   never as silent NaN/Infinity
//! - **Pure and sequential**: scoring is deterministic over immutable
//!   spans, no I/O, no shared state

#![warn(missing_docs)]

mod error;
pub mod eval;
pub mod locate;
pub mod span;

pub use error::{Error, Result};
pub use eval::{
    score_corpus, score_query, CorpusReport, FailurePolicy, MetricSummary, Query, QueryScores,
};
pub use locate::{locate, locate_chunks};
pub use span::Span;

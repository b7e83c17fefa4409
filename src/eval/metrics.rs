//! Per-query metric computation.

use crate::span::{total_len, union, Span};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One evaluation query: ranked retrieved spans plus ground-truth
/// reference spans, all in the same document's coordinate system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    /// Stable identifier, used in error reports and logs.
    pub id: String,
    /// The query text. Not consumed by scoring; carried for reporting.
    pub text: String,
    /// Retrieved spans in rank order. May be longer than the `n_results`
    /// cutoff; only the first `n_results` are scored.
    pub retrieved: Vec<Span>,
    /// Ground-truth relevant spans. May overlap each other.
    pub references: Vec<Span>,
}

/// Token-level scores for one query, as percentages in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryScores {
    /// Fraction of reference tokens covered by retrieved spans.
    pub recall: f64,
    /// Fraction of retrieved tokens falling inside reference spans.
    pub precision: f64,
    /// Intersection over union of retrieved vs. reference coverage.
    pub iou: f64,
}

/// Score one query against its references, using the first `n_results`
/// retrieved spans.
///
/// The true-positive count is the unioned length of every pairwise
/// retrieved x reference intersection, so a reference token covered by two
/// different chunks is counted once. The denominators are deliberately NOT
/// unioned (plain sums over the span lists) to match the original metric
/// definition; with self-overlapping references or chunks this distorts the
/// scores, but switching to unioned denominators would break comparability
/// with published numbers.
///
/// # Errors
///
/// [`Error::EmptyReferences`] / [`Error::EmptyRetrieval`] when the
/// respective length sum is zero. These are per-query data conditions, not
/// batch failures; [`super::score_corpus`] decides skip vs. abort.
pub fn score_query(query: &Query, n_results: usize) -> Result<QueryScores> {
    let retrieved = &query.retrieved[..query.retrieved.len().min(n_results)];

    let mut intersections = Vec::new();
    for chunk in retrieved {
        for reference in &query.references {
            if let Some(overlap) = chunk.intersect(*reference) {
                intersections.push(overlap);
            }
        }
    }
    let true_positive = total_len(&union(&intersections));

    // Plain sums, not unioned coverage (see function docs).
    let all_relevant = total_len(&query.references);
    let all_retrieved = total_len(retrieved);

    if all_relevant == 0 {
        return Err(Error::empty_references(&query.id));
    }
    if all_retrieved == 0 {
        return Err(Error::empty_retrieval(&query.id));
    }

    let tp = true_positive as f64;
    let scores = QueryScores {
        recall: 100.0 * tp / all_relevant as f64,
        precision: 100.0 * tp / all_retrieved as f64,
        iou: 100.0 * tp / (all_relevant as f64 + all_retrieved as f64 - tp),
    };
    log::debug!(
        "query {}: recall={:.2} precision={:.2} iou={:.2}",
        query.id,
        scores.recall,
        scores.precision,
        scores.iou
    );
    Ok(scores)
}

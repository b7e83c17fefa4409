//! Corpus-level aggregation and reporting.

use super::metrics::{score_query, Query};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do when a single query fails to score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Log and skip the query, recording its id in the report.
    #[default]
    Skip,
    /// Propagate the first per-query error and abort the batch.
    Abort,
}

/// Mean and population standard deviation of one metric across a corpus,
/// rounded to 2 decimals for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Arithmetic mean of the per-query percentages.
    pub mean: f64,
    /// Population standard deviation (divide by N, not N-1).
    pub std_dev: f64,
}

impl MetricSummary {
    /// Summarize a list of per-query scores.
    ///
    /// An empty list yields zeros; [`score_corpus`] only produces that when
    /// every query was skipped.
    #[must_use]
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
            };
        }
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean: round2(mean),
            std_dev: round2(variance.sqrt()),
        }
    }
}

impl fmt::Display for MetricSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} ± {:.2}", self.mean, self.std_dev)
    }
}

/// Terminal artifact of one evaluation run: per-metric summaries plus the
/// raw per-query score lists they were computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusReport {
    /// Recall summary across scored queries.
    pub recall: MetricSummary,
    /// Precision summary across scored queries.
    pub precision: MetricSummary,
    /// IoU summary across scored queries.
    pub iou: MetricSummary,
    /// Per-query recall percentages, in query order (skipped queries absent).
    pub recall_scores: Vec<f64>,
    /// Per-query precision percentages.
    pub precision_scores: Vec<f64>,
    /// Per-query IoU percentages.
    pub iou_scores: Vec<f64>,
    /// Ids of queries skipped under [`FailurePolicy::Skip`].
    pub skipped: Vec<String>,
}

impl CorpusReport {
    /// Number of queries that produced scores.
    #[must_use]
    pub fn scored_queries(&self) -> usize {
        self.recall_scores.len()
    }

    /// Format as a markdown table.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!(
            "| Metric | Mean | Std |\n\
             |-----------|--------|--------|\n\
             | Recall | {:.2} | {:.2} |\n\
             | Precision | {:.2} | {:.2} |\n\
             | IoU | {:.2} | {:.2} |",
            self.recall.mean,
            self.recall.std_dev,
            self.precision.mean,
            self.precision.std_dev,
            self.iou.mean,
            self.iou.std_dev,
        )
    }

    /// Serialize the full report (summaries and raw lists) to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] on serialization failure.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for CorpusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recall: {}", self.recall)?;
        writeln!(f, "Precision: {}", self.precision)?;
        write!(f, "IoU: {}", self.iou)
    }
}

/// Score a whole query set and aggregate.
///
/// Queries are scored independently and sequentially; per-query failures
/// (zero-length reference or retrieved sets) are handled per `policy`.
///
/// # Errors
///
/// Under [`FailurePolicy::Abort`], the first per-query error is returned.
/// Under [`FailurePolicy::Skip`] this function only fails if scoring hits a
/// non-recoverable error.
pub fn score_corpus(
    queries: &[Query],
    n_results: usize,
    policy: FailurePolicy,
) -> Result<CorpusReport> {
    let mut recall_scores = Vec::with_capacity(queries.len());
    let mut precision_scores = Vec::with_capacity(queries.len());
    let mut iou_scores = Vec::with_capacity(queries.len());
    let mut skipped = Vec::new();

    for query in queries {
        match score_query(query, n_results) {
            Ok(scores) => {
                recall_scores.push(scores.recall);
                precision_scores.push(scores.precision);
                iou_scores.push(scores.iou);
            }
            Err(e) if policy == FailurePolicy::Skip && e.is_recoverable() => {
                log::warn!("skipping query {}: {e}", query.id);
                skipped.push(query.id.clone());
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "scored {} queries ({} skipped) at n_results={n_results}",
        recall_scores.len(),
        skipped.len()
    );

    Ok(CorpusReport {
        recall: MetricSummary::from_scores(&recall_scores),
        precision: MetricSummary::from_scores(&precision_scores),
        iou: MetricSummary::from_scores(&iou_scores),
        recall_scores,
        precision_scores,
        iou_scores,
        skipped,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end).unwrap()
    }

    fn query(id: &str, retrieved: Vec<Span>, references: Vec<Span>) -> Query {
        Query {
            id: id.into(),
            text: String::new(),
            retrieved,
            references,
        }
    }

    #[test]
    fn test_summary_mean_and_population_std() {
        // mean 50, population variance ((25)^2 + (25)^2) / 2 = 625
        let summary = MetricSummary::from_scores(&[25.0, 75.0]);
        assert_eq!(summary.mean, 50.0);
        assert_eq!(summary.std_dev, 25.0);
    }

    #[test]
    fn test_summary_rounds_to_two_decimals() {
        let summary = MetricSummary::from_scores(&[100.0 / 3.0]);
        assert_eq!(summary.mean, 33.33);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn test_summary_empty() {
        let summary = MetricSummary::from_scores(&[]);
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn test_corpus_skip_policy_records_ids() {
        let queries = vec![
            query("good", vec![span(0, 10)], vec![span(0, 10)]),
            query("degenerate", vec![span(0, 10)], vec![span(5, 5)]),
        ];
        let report = score_corpus(&queries, 5, FailurePolicy::Skip).unwrap();
        assert_eq!(report.scored_queries(), 1);
        assert_eq!(report.skipped, vec!["degenerate".to_string()]);
        assert_eq!(report.recall.mean, 100.0);
    }

    #[test]
    fn test_corpus_abort_policy_propagates() {
        let queries = vec![query("degenerate", vec![span(0, 10)], vec![span(5, 5)])];
        let err = score_corpus(&queries, 5, FailurePolicy::Abort).unwrap_err();
        assert!(matches!(err, crate::Error::EmptyReferences { .. }));
    }

    #[test]
    fn test_report_renderings() {
        let queries = vec![query("q1", vec![span(5, 15)], vec![span(0, 10)])];
        let report = score_corpus(&queries, 5, FailurePolicy::Skip).unwrap();

        let md = report.to_markdown();
        assert!(md.contains("| Recall | 50.00 |"));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"recall_scores\""));

        assert_eq!(
            report.to_string(),
            "Recall: 50.00 ± 0.00\nPrecision: 50.00 ± 0.00\nIoU: 33.33 ± 0.00"
        );
    }
}

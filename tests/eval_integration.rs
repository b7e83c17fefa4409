//! End-to-end evaluation tests: worked examples with hand-computed scores,
//! the locate -> score pipeline path, and corpus aggregation.

use spancov::{
    locate_chunks, score_corpus, score_query, Error, FailurePolicy, Query, QueryScores, Span,
};

fn span(start: usize, end: usize) -> Span {
    Span::new(start, end).unwrap()
}

fn query(id: &str, retrieved: Vec<Span>, references: Vec<Span>) -> Query {
    Query {
        id: id.into(),
        text: format!("question {id}"),
        retrieved,
        references,
    }
}

#[test]
fn worked_example_single_partial_overlap() {
    // references=[(0,10)], retrieved=[(5,15)]:
    // intersection (5,10), tp=5, relevant=10, retrieved=10
    let q = query("a", vec![span(5, 15)], vec![span(0, 10)]);
    let scores = score_query(&q, 5).unwrap();

    assert_eq!(scores.recall, 50.0);
    assert_eq!(scores.precision, 50.0);
    assert!((scores.iou - 33.3333).abs() < 0.001);
}

#[test]
fn worked_example_two_references_two_chunks() {
    // references=[(0,10),(20,30)], retrieved=[(0,10),(15,25)]:
    // tp union {(0,10),(20,25)} = 15, relevant=20, retrieved=20
    let q = query(
        "b",
        vec![span(0, 10), span(15, 25)],
        vec![span(0, 10), span(20, 30)],
    );
    let scores = score_query(&q, 5).unwrap();

    assert_eq!(scores.recall, 75.0);
    assert_eq!(scores.precision, 75.0);
    assert_eq!(scores.iou, 60.0);
}

#[test]
fn perfect_retrieval_scores_100() {
    let q = query("c", vec![span(10, 50)], vec![span(10, 50)]);
    let scores = score_query(&q, 5).unwrap();
    assert_eq!(
        scores,
        QueryScores {
            recall: 100.0,
            precision: 100.0,
            iou: 100.0
        }
    );
}

#[test]
fn degenerate_reference_is_error_not_nan() {
    let q = query("d", vec![span(0, 10)], vec![span(5, 5)]);
    match score_query(&q, 5) {
        Err(Error::EmptyReferences { query }) => assert_eq!(query, "d"),
        other => panic!("expected EmptyReferences, got {other:?}"),
    }
}

#[test]
fn scores_always_in_percentage_bounds() {
    let cases = vec![
        query("full", vec![span(0, 100)], vec![span(40, 60)]),
        query("narrow", vec![span(49, 51)], vec![span(0, 100)]),
        query("miss", vec![span(200, 300)], vec![span(0, 100)]),
        query(
            "overlapping_refs",
            vec![span(0, 50)],
            vec![span(0, 30), span(20, 50)],
        ),
    ];
    for q in cases {
        let scores = score_query(&q, 5).unwrap();
        for value in [scores.recall, scores.precision, scores.iou] {
            assert!(
                (0.0..=100.0).contains(&value),
                "query {}: score {value} out of bounds",
                q.id
            );
        }
    }
}

#[test]
fn locate_then_score_pipeline() {
    // Offsets derived by substring search instead of being supplied.
    let document = "The committee approved the budget. The mayor opposed it.";
    let chunks = ["approved the budget", "not in the document"];
    let retrieved = locate_chunks(document, &chunks);

    // Annotated reference: "The committee approved the budget."
    let references = vec![span(0, 34)];
    let q = Query {
        id: "pipeline".into(),
        text: "what happened to the budget?".into(),
        retrieved,
        references,
    };

    let scores = score_query(&q, 5).unwrap();
    // 19 of 34 reference bytes covered; all 19 retrieved bytes relevant.
    assert!((scores.recall - 100.0 * 19.0 / 34.0).abs() < 1e-9);
    assert_eq!(scores.precision, 100.0);
}

#[test]
fn corpus_aggregation_matches_hand_computation() {
    let queries = vec![
        query("a", vec![span(5, 15)], vec![span(0, 10)]), // 50 / 50
        query(
            "b",
            vec![span(0, 10), span(15, 25)],
            vec![span(0, 10), span(20, 30)],
        ), // 75 / 75
    ];
    let report = score_corpus(&queries, 5, FailurePolicy::Skip).unwrap();

    assert_eq!(report.scored_queries(), 2);
    assert!(report.skipped.is_empty());
    // mean (50+75)/2 = 62.5, population std = 12.5
    assert_eq!(report.recall.mean, 62.5);
    assert_eq!(report.recall.std_dev, 12.5);
    assert_eq!(report.precision.mean, 62.5);
    assert_eq!(report.precision.std_dev, 12.5);
    // IoU: (33.33.. + 60) / 2 = 46.67 after 2-decimal rounding
    assert_eq!(report.iou.mean, 46.67);
}

#[test]
fn corpus_mixes_good_and_degenerate_queries() {
    let queries = vec![
        query("good", vec![span(0, 10)], vec![span(0, 10)]),
        query("no_refs", vec![span(0, 10)], vec![]),
        query("empty_retrieval", vec![Span::empty(3)], vec![span(0, 10)]),
    ];

    // Skip: both degenerate queries recorded, aggregation over the rest.
    let report = score_corpus(&queries, 5, FailurePolicy::Skip).unwrap();
    assert_eq!(report.scored_queries(), 1);
    assert_eq!(
        report.skipped,
        vec!["no_refs".to_string(), "empty_retrieval".to_string()]
    );

    // Abort: the first degenerate query kills the batch.
    let err = score_corpus(&queries, 5, FailurePolicy::Abort).unwrap_err();
    assert!(matches!(err, Error::EmptyReferences { .. }));
}

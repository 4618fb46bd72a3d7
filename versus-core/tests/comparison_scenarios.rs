//! End-to-end comparison scenarios through the public API.

use pretty_assertions::assert_eq;
use versus_core::{
    Aspect, Comparison, Corpus, MarkerLexicon, RequestContext, SentenceScores, Side, Stage,
    VersusConfig, Winner,
};

fn engine() -> Comparison {
    Comparison::from_config(&VersusConfig::default()).unwrap()
}

fn scores(items: &[(&str, f64)]) -> SentenceScores {
    items.iter().map(|(s, v)| (s.to_string(), *v)).collect()
}

#[test]
fn apple_is_better_than_orange() {
    let comparator = versus_core::SentenceComparator::new(
        std::sync::Arc::new(versus_core::SubstringLocator),
        std::sync::Arc::new(versus_core::RegexMarkerLocator::new(&MarkerLexicon::default()).unwrap()),
    );
    let decision = comparator
        .decide("Apple is better than Orange.", "apple", "orange")
        .unwrap();
    assert_eq!(decision.winner, Side::A);
    assert_eq!(decision.marker_count, 1);

    let decision = comparator
        .decide("Apple is not better than Orange.", "apple", "orange")
        .unwrap();
    assert_eq!(decision.winner, Side::B);
}

#[test]
fn equal_totals_report_no_winner() {
    // Each side collects exactly 5.0 points.
    let s = scores(&[
        ("Apple is better than orange.", 10.0),
        ("Apple is faster and safer than orange.", 10.0),
        ("Orange is better than apple in price.", 10.0),
    ]);
    let aspects = vec![Aspect::new("price", 3)];
    let mut ctx = RequestContext::new();
    let result = engine()
        .run(&mut ctx, &s, "apple", "orange", &aspects)
        .unwrap();

    assert_eq!(result.total_score_object1, 3.0);
    assert_eq!(result.total_score_object2, 4.0);
    assert_eq!(result.winner, Winner::Entity("orange".into()));

    let s = scores(&[
        ("Apple is better than orange.", 10.0),
        ("Apple is faster, safer, nicer and cooler than orange.", 10.0),
        ("Orange is better than apple in price.", 10.0),
        ("Orange is superior to apple.", 10.0),
    ]);
    let mut ctx = RequestContext::new();
    let result = engine()
        .run(&mut ctx, &s, "apple", "orange", &aspects)
        .unwrap();
    assert_eq!(result.total_score_object1, 5.0);
    assert_eq!(result.total_score_object2, 5.0);
    assert_eq!(result.winner, Winner::NoWinner);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["winner"], "No winner found");
}

#[test]
fn multiple_aspects_share_one_bucket() {
    let s = scores(&[("Apple has better taste and price than orange.", 2.0)]);
    let aspects = vec![Aspect::new("taste", 1), Aspect::new("price", 2)];
    let mut ctx = RequestContext::new();
    let result = engine()
        .run(&mut ctx, &s, "apple", "orange", &aspects)
        .unwrap();

    // (1 + 1) + (2 + 1)
    assert_eq!(result.score_object1["multiple"], 5.0);
    assert_eq!(
        result.sentences_object1["multiple"],
        vec!["Apple has better taste and price than orange.".to_string()]
    );
    assert!(result.score_object2.is_empty());
}

#[test]
fn all_zero_scores_keep_sentences_but_add_nothing() {
    let s = scores(&[
        ("Apple is better than orange.", 0.0),
        ("Orange is worse than apple.", 0.0),
    ]);
    let mut ctx = RequestContext::new();
    let result = engine().run(&mut ctx, &s, "apple", "orange", &[]).unwrap();
    assert_eq!(result.total_score_object1, 0.0);
    assert_eq!(result.sentences_object1["none"].len(), 2);
    assert_eq!(result.winner, Winner::NoWinner);
}

#[test]
fn corpus_pipeline_records_every_stage() {
    let corpus = Corpus::from_json_str(
        r#"[
            {"text": "Python is easier than Java for beginners.", "score": 12.0},
            {"text": "Java is faster than Python at runtime.", "score": 6.0},
            {"text": "Is Java better than Python?", "score": 20.0},
            {"text": "Python and Java are languages.", "score": 3.0}
        ]"#,
        &MarkerLexicon::default(),
    )
    .unwrap();

    let mut ctx = RequestContext::new();
    let result = engine()
        .compare(&mut ctx, &corpus, "python", "java", &[Aspect::new("runtime", 2)])
        .unwrap();

    // The question and the marker-less sentence are cleared; max score is 12.
    assert_eq!(result.total_score_object1, 1.0);
    assert_eq!(result.score_object2["runtime"], 1.5);
    assert_eq!(result.winner, Winner::Entity("java".into()));

    let stages: Vec<Stage> = ctx.stages().iter().map(|r| r.stage).collect();
    assert_eq!(
        stages,
        vec![
            Stage::RequestSentences,
            Stage::ClearSentences,
            Stage::FindWinner,
            Stage::Done
        ]
    );
}

#[test]
fn result_buckets_serialize_in_insertion_order() {
    let s = scores(&[
        ("Apple is cheaper in price than orange.", 1.0),
        ("Apple is better than orange.", 1.0),
    ]);
    let mut ctx = RequestContext::new();
    let result = engine()
        .run(&mut ctx, &s, "apple", "orange", &[Aspect::new("price", 1)])
        .unwrap();
    let json = serde_json::to_string(&result.score_object1).unwrap();
    assert_eq!(json, r#"{"price":2.0,"none":1.0}"#);
}

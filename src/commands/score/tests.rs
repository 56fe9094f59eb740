use super::*;

fn dataset_row(video_id: &str, evidence: &str, terms: &[&str]) -> DatasetRow {
    DatasetRow {
        video_id: video_id.to_string(),
        evidence_text: evidence.to_string(),
        salient_terms: terms.iter().map(|term| term.to_string()).collect(),
        target_chars: 600,
        duration_seconds: 300,
        ..DatasetRow::default()
    }
}

fn completion_row(video_id: &str, completions: &[&str]) -> CompletionRow {
    CompletionRow {
        video_id: video_id.to_string(),
        completions: completions.iter().map(|value| value.to_string()).collect(),
    }
}

#[test]
fn build_batch_repeats_row_context_per_generation() {
    let dataset = vec![
        dataset_row("a", "alpha evidence", &["alpha"]),
        dataset_row("b", "beta evidence", &["beta"]),
    ];
    let completions = vec![
        completion_row("b", &["S: beta\nV: one", "S: beta\nV: two"]),
        completion_row("missing", &["S: x\nV: y"]),
        completion_row("a", &["S: alpha\nV: three"]),
    ];

    let batch = build_batch(&dataset, &completions);
    assert_eq!(batch.candidates.len(), 3);
    assert_eq!(batch.skipped_rows, 1);
    assert_eq!(
        batch.keys,
        vec![
            ("b".to_string(), 0),
            ("b".to_string(), 1),
            ("a".to_string(), 0)
        ]
    );
    assert_eq!(batch.context.evidence_text[1], "beta evidence");
    assert_eq!(batch.context.salient_terms[2], vec!["alpha".to_string()]);
    assert_eq!(batch.context.target_chars, vec![600.0, 600.0, 600.0]);
    assert_eq!(batch.context.duration_seconds, vec![300.0, 300.0, 300.0]);
}

#[test]
fn scored_candidates_and_summaries_cover_every_scorer() {
    let engine = RewardEngine::new(RewardConfig::default()).expect("default engine");
    let dataset = vec![dataset_row("a", "alpha and 3 betas", &["alpha", "betas"])];
    let completions = vec![completion_row(
        "a",
        &["S: alpha overview\nV: 3 betas compared", "not formatted"],
    )];

    let batch = build_batch(&dataset, &completions);
    let vectors = engine.score_batch(&batch.candidates, &batch.context);
    let totals = engine.weighted_total(&vectors);
    let candidates = scored_candidates(&batch, &vectors, &totals);

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].scores.len(), 8);
    assert_eq!(candidates[0].scores["format"], 1.0);
    assert_eq!(candidates[1].scores["format"], -3.0);
    assert!(candidates[0].total > candidates[1].total);

    let summaries = summarize(&engine, &vectors);
    assert_eq!(summaries.len(), 8);
    let format = summaries
        .iter()
        .find(|summary| summary.scorer == "format")
        .expect("format summary");
    assert_eq!(format.scored, 2);
    assert_eq!(format.mean, -1.0);
    assert_eq!(format.min, -3.0);
    assert_eq!(format.max, 1.0);
}

#[test]
fn summarize_handles_empty_vectors() {
    let engine = RewardEngine::new(RewardConfig::default()).expect("default engine");
    let summaries = summarize(
        &engine,
        &[ScoreVector {
            scorer: "coverage",
            scores: Vec::new(),
        }],
    );
    assert_eq!(summaries[0].scored, 0);
    assert_eq!(summaries[0].mean, 0.0);
    assert_eq!(summaries[0].min, 0.0);
}

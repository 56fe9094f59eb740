use super::prompt::{build_chat_prompt, build_user_prompt};
use super::*;

fn segment(text: &str) -> TranscriptSegment {
    TranscriptSegment {
        text: Some(text.to_string()),
    }
}

#[test]
fn join_segments_skips_blank_and_missing_text() {
    let segments = vec![
        segment("  hello "),
        segment("   "),
        TranscriptSegment::default(),
        segment("world"),
    ];
    assert_eq!(join_segments(&segments), "hello world");
}

#[test]
fn compute_wpm_guards_zero_duration() {
    assert_eq!(compute_wpm("one two three", 60), 3.0);
    assert!(compute_wpm("one two three", 0).is_finite());
    assert_eq!(compute_wpm("", 0), 0.0);
}

#[test]
fn compute_target_chars_scales_with_duration_and_density() {
    assert_eq!(compute_target_chars(0, 0.0), 260);
    assert_eq!(compute_target_chars(600, 150.0), 363);
    assert_eq!(compute_target_chars(3600, 400.0), 585);
    assert_eq!(compute_target_chars(0, 3_000_000.0), 3000);
}

#[test]
fn build_row_carries_metadata_and_terms() {
    let transcript = TranscriptRow {
        video_id: "abc123".to_string(),
        title: "Borrowing".to_string(),
        duration_seconds: Some(120.0),
        transcript_segments: vec![
            segment("The borrow checker checks borrows."),
            segment("The borrow checker is strict."),
        ],
        ..TranscriptRow::default()
    };
    let extractor = TermExtractor::new().expect("term extractor builds");

    let row = build_row(&transcript, &extractor, 3);
    assert_eq!(row.video_id, "abc123");
    assert_eq!(row.duration_seconds, 120);
    assert_eq!(
        row.evidence_text,
        "The borrow checker checks borrows. The borrow checker is strict."
    );
    assert_eq!(row.wpm, 5.0);
    assert_eq!(row.salient_terms, vec!["borrow", "borrow checker", "checker"]);
    assert!((200..=3000).contains(&row.target_chars));
    assert_eq!(row.prompt.len(), 2);
    assert!(row.prompt[1].content.contains("- Duration: 120s (~2.0m)"));
}

#[test]
fn build_row_truncates_fractional_and_rejects_bad_durations() {
    let extractor = TermExtractor::new().expect("term extractor builds");
    let cases = [
        (Some(212.9), 212),
        (Some(-5.0), 0),
        (Some(f64::NAN), 0),
        (None, 0),
    ];
    for (duration_seconds, expected) in cases {
        let transcript = TranscriptRow {
            duration_seconds,
            ..TranscriptRow::default()
        };
        assert_eq!(build_row(&transcript, &extractor, 3).duration_seconds, expected);
    }
}

#[test]
fn transcript_rows_accept_integer_and_float_durations() {
    let float: TranscriptRow =
        serde_json::from_str(r#"{"video_id": "a", "duration_seconds": 212.0}"#)
            .expect("float duration parses");
    assert_eq!(float.duration_seconds, Some(212.0));

    let int: TranscriptRow = serde_json::from_str(r#"{"video_id": "b", "duration_seconds": 90}"#)
        .expect("integer duration parses");
    assert_eq!(int.duration_seconds, Some(90.0));

    let null: TranscriptRow = serde_json::from_str(r#"{"duration_seconds": null}"#)
        .expect("null duration parses");
    assert_eq!(null.duration_seconds, None);
}

#[test]
fn user_prompt_renders_metadata_and_evidence() {
    let row = DatasetRow {
        title: "Borrowing".to_string(),
        channel: "Rustaceans".to_string(),
        duration_seconds: 150,
        url: "https://example.com/watch?v=abc123".to_string(),
        evidence_text: "The borrow checker is strict.".to_string(),
        ..DatasetRow::default()
    };

    assert_eq!(
        build_user_prompt(&row),
        "Video:\n\
         - Title: Borrowing\n\
         - Channel: Rustaceans\n\
         - Duration: 150s (~2.5m)\n\
         - URL: https://example.com/watch?v=abc123\n\n\
         Transcript (evidence; do not invent details not supported here):\n\
         The borrow checker is strict.\n\n\
         Now produce the EXACT 2-line output with S: and V: (single-line each)."
    );

    let unknown = DatasetRow::default();
    assert!(build_user_prompt(&unknown).contains("- Duration: 0s (~0.0m)\n"));
}

#[test]
fn chat_prompt_pairs_system_contract_with_user_message() {
    let row = DatasetRow {
        title: "Borrowing".to_string(),
        duration_seconds: 59,
        ..DatasetRow::default()
    };

    let prompt = build_chat_prompt(&row);
    let roles = prompt
        .iter()
        .map(|message| message.role.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(roles, vec!["system", "user"]);
    assert!(prompt[0].content.starts_with("You are a YouTube transcript summarizer"));
    assert!(prompt[0].content.contains("\n  S: <one-line insight-dense summary"));
    assert!(prompt[0].content.contains("\n  V: <one-line incremental value analysis"));
    assert!(prompt[0].content.ends_with("Do NOT mention being an AI/model."));
    assert_eq!(prompt[1].content, build_user_prompt(&row));
    assert!(prompt[1].content.contains("- Duration: 59s (~1.0m)"));

    let encoded = serde_json::to_value(&prompt).expect("prompt serializes");
    assert_eq!(encoded[0]["role"], "system");
    assert_eq!(encoded[1]["content"], prompt[1].content.as_str());
}

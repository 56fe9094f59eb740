use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TranscriptSegment {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TranscriptRow {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub duration_seconds: Option<f64>,
    pub url: String,
    pub transcript_segments: Vec<TranscriptSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetRow {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub duration_seconds: u64,
    pub url: String,
    pub evidence_text: String,
    pub salient_terms: Vec<String>,
    pub wpm: f64,
    pub target_chars: u32,
    pub prompt: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionRow {
    pub video_id: String,
    #[serde(default)]
    pub completions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputFingerprint {
    pub path: String,
    pub sha256: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub video_id: String,
    pub generation: usize,
    pub scores: BTreeMap<String, f64>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScorerSummary {
    pub scorer: String,
    pub weight: f64,
    pub scored: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub report_version: u32,
    pub generated_at: String,
    pub dataset: InputFingerprint,
    pub completions: InputFingerprint,
    pub config_path: Option<String>,
    pub candidate_count: usize,
    pub skipped_completion_rows: usize,
    pub mean_total: f64,
    pub scorers: Vec<ScorerSummary>,
    pub candidates: Vec<ScoredCandidate>,
}

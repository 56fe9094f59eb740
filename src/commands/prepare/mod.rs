use anyhow::{Result, bail};
use tracing::{info, warn};

use sv_reward::terms::TermExtractor;

use crate::cli::PrepareArgs;
use crate::model::{DatasetRow, TranscriptRow, TranscriptSegment};
use crate::util::{read_jsonl, write_jsonl};

mod prompt;

#[cfg(test)]
mod tests;

const MIN_TARGET_CHARS: f64 = 200.0;
const MAX_TARGET_CHARS: f64 = 3000.0;
const BASELINE_WPM: f64 = 120.0;

pub fn run(args: PrepareArgs) -> Result<()> {
    if args.top_k == 0 {
        bail!("--top-k must be at least 1");
    }

    let mut transcripts: Vec<TranscriptRow> = read_jsonl(&args.in_jsonl)?;
    if args.limit > 0 {
        transcripts.truncate(args.limit);
    }
    info!(
        path = %args.in_jsonl.display(),
        rows = transcripts.len(),
        "loaded transcripts"
    );

    let extractor = TermExtractor::new()?;
    let rows = transcripts
        .iter()
        .map(|transcript| build_row(transcript, &extractor, args.top_k))
        .collect::<Vec<DatasetRow>>();

    let empty_rows = rows.iter().filter(|row| row.evidence_text.is_empty()).count();
    if empty_rows > 0 {
        warn!(rows = empty_rows, "transcripts without usable segment text");
    }

    write_jsonl(&args.out_jsonl, &rows)?;
    info!(path = %args.out_jsonl.display(), rows = rows.len(), "wrote dataset");

    Ok(())
}

pub(crate) fn build_row(
    transcript: &TranscriptRow,
    extractor: &TermExtractor,
    top_k: usize,
) -> DatasetRow {
    let duration_seconds = transcript
        .duration_seconds
        .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
        .map(|seconds| seconds as u64)
        .unwrap_or(0);
    let evidence_text = join_segments(&transcript.transcript_segments);
    let wpm = compute_wpm(&evidence_text, duration_seconds);
    let target_chars = compute_target_chars(duration_seconds, wpm);
    let salient_terms = extractor.extract(&evidence_text, top_k);

    let mut row = DatasetRow {
        video_id: transcript.video_id.clone(),
        title: transcript.title.clone(),
        channel: transcript.channel.clone(),
        duration_seconds,
        url: transcript.url.clone(),
        evidence_text,
        salient_terms,
        wpm,
        target_chars,
        prompt: Vec::new(),
    };
    row.prompt = prompt::build_chat_prompt(&row);
    row
}

pub(crate) fn join_segments(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .filter_map(|segment| segment.text.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}

pub(crate) fn compute_wpm(full_text: &str, duration_seconds: u64) -> f64 {
    let words = full_text.split_whitespace().count() as f64;
    let minutes = (duration_seconds as f64 / 60.0).max(1e-6);
    words / minutes
}

pub(crate) fn compute_target_chars(duration_seconds: u64, wpm: f64) -> u32 {
    let minutes = duration_seconds as f64 / 60.0;
    let base = 260.0 + 35.0 * minutes.ln_1p();
    let density = 0.65 * (wpm - BASELINE_WPM).max(0.0);
    let target = base + density;

    if !target.is_finite() {
        return MAX_TARGET_CHARS as u32;
    }
    target.clamp(MIN_TARGET_CHARS, MAX_TARGET_CHARS) as u32
}

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Result, bail};
use tracing::{info, warn};

use sv_reward::reward::ScoreVector;
use sv_reward::{BatchContext, RewardConfig, RewardEngine};

use crate::cli::ScoreArgs;
use crate::model::{
    CompletionRow, DatasetRow, InputFingerprint, ScoreReport, ScoredCandidate, ScorerSummary,
};
use crate::util::{now_utc_string, read_jsonl, sha256_file, write_json_pretty};

#[cfg(test)]
mod tests;

const REPORT_VERSION: u32 = 1;

#[derive(Debug, Default)]
pub(crate) struct ScoringBatch {
    pub(crate) candidates: Vec<String>,
    pub(crate) context: BatchContext,
    pub(crate) keys: Vec<(String, usize)>,
    pub(crate) skipped_rows: usize,
}

pub fn run(args: ScoreArgs) -> Result<()> {
    let config = RewardConfig::load_or_default(args.config.as_deref())?;
    let engine = RewardEngine::new(config)?;

    let dataset: Vec<DatasetRow> = read_jsonl(&args.dataset)?;
    let completions: Vec<CompletionRow> = read_jsonl(&args.completions)?;
    info!(
        dataset_rows = dataset.len(),
        completion_rows = completions.len(),
        "loaded scoring inputs"
    );

    let batch = build_batch(&dataset, &completions);
    if batch.candidates.is_empty() {
        bail!(
            "no completions matched dataset rows ({} completion rows skipped)",
            batch.skipped_rows
        );
    }

    let vectors = engine.score_batch(&batch.candidates, &batch.context);
    let totals = engine.weighted_total(&vectors);
    let candidates = scored_candidates(&batch, &vectors, &totals);
    let scorers = summarize(&engine, &vectors);
    let mean_total = mean(&totals);

    let report = ScoreReport {
        report_version: REPORT_VERSION,
        generated_at: now_utc_string(),
        dataset: fingerprint(&args.dataset, dataset.len())?,
        completions: fingerprint(&args.completions, completions.len())?,
        config_path: args
            .config
            .as_ref()
            .map(|path| path.display().to_string()),
        candidate_count: batch.candidates.len(),
        skipped_completion_rows: batch.skipped_rows,
        mean_total,
        scorers,
        candidates,
    };

    write_json_pretty(&args.report_path, &report)?;
    info!(path = %args.report_path.display(), "wrote score report");
    info!(
        candidates = report.candidate_count,
        mean_total = report.mean_total,
        "scoring completed"
    );

    Ok(())
}

pub(crate) fn build_batch(dataset: &[DatasetRow], completions: &[CompletionRow]) -> ScoringBatch {
    let rows_by_id = dataset
        .iter()
        .map(|row| (row.video_id.as_str(), row))
        .collect::<HashMap<&str, &DatasetRow>>();

    let mut batch = ScoringBatch::default();
    for completion in completions {
        let Some(row) = rows_by_id.get(completion.video_id.as_str()) else {
            warn!(video_id = %completion.video_id, "completion row has no dataset row; skipping");
            batch.skipped_rows += 1;
            continue;
        };

        for (generation, candidate) in completion.completions.iter().enumerate() {
            batch.candidates.push(candidate.clone());
            batch.context.evidence_text.push(row.evidence_text.clone());
            batch.context.salient_terms.push(row.salient_terms.clone());
            batch.context.target_chars.push(f64::from(row.target_chars));
            batch
                .context
                .duration_seconds
                .push(row.duration_seconds as f64);
            batch.keys.push((row.video_id.clone(), generation));
        }
    }

    batch
}

fn scored_candidates(
    batch: &ScoringBatch,
    vectors: &[ScoreVector],
    totals: &[f64],
) -> Vec<ScoredCandidate> {
    batch
        .keys
        .iter()
        .zip(totals.iter())
        .enumerate()
        .map(|(index, ((video_id, generation), total))| ScoredCandidate {
            video_id: video_id.clone(),
            generation: *generation,
            scores: vectors
                .iter()
                .filter_map(|vector| {
                    vector
                        .scores
                        .get(index)
                        .map(|score| (vector.scorer.to_string(), *score))
                })
                .collect::<BTreeMap<String, f64>>(),
            total: *total,
        })
        .collect()
}

pub(crate) fn summarize(engine: &RewardEngine, vectors: &[ScoreVector]) -> Vec<ScorerSummary> {
    vectors
        .iter()
        .map(|vector| ScorerSummary {
            scorer: vector.scorer.to_string(),
            weight: engine.config().weights.for_scorer(vector.scorer),
            scored: vector.scores.len(),
            mean: mean(&vector.scores),
            min: vector.scores.iter().copied().fold(f64::INFINITY, f64::min),
            max: vector.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
        .map(|mut summary| {
            if summary.scored == 0 {
                summary.min = 0.0;
                summary.max = 0.0;
            }
            summary
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len().max(1) as f64
}

fn fingerprint(path: &Path, rows: usize) -> Result<InputFingerprint> {
    Ok(InputFingerprint {
        path: path.display().to_string(),
        sha256: sha256_file(path)?,
        rows,
    })
}

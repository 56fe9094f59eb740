use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use sv_reward::reward::parse_output;
use sv_reward::{ItemContext, RewardConfig, RewardEngine};

use crate::cli::CheckArgs;

#[derive(Debug, Serialize)]
struct CheckResponse {
    parsed: bool,
    summary: String,
    value: String,
    scores: Vec<CheckScore>,
    total: f64,
}

#[derive(Debug, Serialize)]
struct CheckScore {
    scorer: String,
    score: f64,
    weight: f64,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let candidate = match (&args.candidate, &args.candidate_file) {
        (Some(candidate), _) => candidate.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read candidate file: {}", path.display()))?,
        (None, None) => bail!("either --candidate or --candidate-file is required"),
    };

    let evidence_text = match &args.evidence_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read evidence file: {}", path.display()))?,
        None => String::new(),
    };

    let config = RewardConfig::load_or_default(args.config.as_deref())?;
    let engine = RewardEngine::new(config)?;

    let item = ItemContext {
        evidence_text: &evidence_text,
        salient_terms: &args.terms,
        target_chars: args.target_chars,
        duration_seconds: args.duration_seconds,
    };
    let breakdown = engine.score_item(&candidate, &item);
    let parsed = parse_output(&candidate);

    let response = CheckResponse {
        parsed: parsed.is_parsed(),
        summary: parsed.summary().to_string(),
        value: parsed.value().to_string(),
        scores: breakdown
            .scores
            .iter()
            .map(|(scorer, score)| CheckScore {
                scorer: scorer.to_string(),
                score: *score,
                weight: engine.config().weights.for_scorer(scorer),
            })
            .collect(),
        total: breakdown.total,
    };

    info!(
        parsed = response.parsed,
        terms = args.terms.len(),
        total = response.total,
        "candidate scored"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &response)
        .context("failed to serialize check response")?;
    handle
        .write_all(b"\n")
        .context("failed to write check response")?;

    Ok(())
}

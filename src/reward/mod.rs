use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RewardConfig;

mod artifacts;
mod coverage;
mod density;
mod format;
mod grounding;
mod incremental;
mod length;
mod parse;
mod stuffing;
pub mod text;


pub use artifacts::ArtifactScorer;
pub use coverage::CoverageScorer;
pub use density::DensityScorer;
pub use format::FormatScorer;
pub use grounding::GroundingScorer;
pub use incremental::{IncrementalValueScorer, TermNovelty};
pub use length::{LengthLimits, LengthScorer};
pub use parse::{ParsedOutput, SUMMARY_MARKER, VALUE_MARKER, parse_output};
pub use stuffing::StuffingScorer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextField {
    EvidenceText,
    SalientTerms,
    TargetChars,
}

impl ContextField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EvidenceText => "evidence_text",
            Self::SalientTerms => "salient_terms",
            Self::TargetChars => "target_chars",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItemContext<'a> {
    pub evidence_text: &'a str,
    pub salient_terms: &'a [String],
    pub target_chars: f64,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, Default)]
pub struct BatchContext {
    pub evidence_text: Vec<String>,
    pub salient_terms: Vec<Vec<String>>,
    pub target_chars: Vec<f64>,
    pub duration_seconds: Vec<f64>,
}

impl BatchContext {
    pub fn field_len(&self, field: ContextField) -> usize {
        match field {
            ContextField::EvidenceText => self.evidence_text.len(),
            ContextField::SalientTerms => self.salient_terms.len(),
            ContextField::TargetChars => self.target_chars.len(),
        }
    }

    pub fn aligned_len(&self, candidates: usize, required: &[ContextField]) -> usize {
        required
            .iter()
            .map(|field| self.field_len(*field))
            .fold(candidates, usize::min)
    }

    pub fn item(&self, index: usize) -> ItemContext<'_> {
        ItemContext {
            evidence_text: self
                .evidence_text
                .get(index)
                .map(String::as_str)
                .unwrap_or(""),
            salient_terms: self
                .salient_terms
                .get(index)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            target_chars: self.target_chars.get(index).copied().unwrap_or(0.0),
            duration_seconds: self.duration_seconds.get(index).copied().unwrap_or(0.0),
        }
    }

    pub fn push(&mut self, item: &ItemContext<'_>) {
        self.evidence_text.push(item.evidence_text.to_string());
        self.salient_terms.push(item.salient_terms.to_vec());
        self.target_chars.push(item.target_chars);
        self.duration_seconds.push(item.duration_seconds);
    }
}

pub trait Scorer: Send + Sync {
    fn name(&self) -> &'static str;

    fn requires(&self) -> &'static [ContextField] {
        &[]
    }

    fn score(&self, candidate: &str, item: &ItemContext<'_>) -> f64;

    fn score_batch(&self, candidates: &[String], context: &BatchContext) -> Vec<f64> {
        let len = context.aligned_len(candidates.len(), self.requires());
        if len < candidates.len() {
            let short_fields = self
                .requires()
                .iter()
                .filter(|field| context.field_len(**field) < candidates.len())
                .map(|field| field.as_str())
                .collect::<Vec<&str>>()
                .join(",");
            warn!(
                scorer = self.name(),
                candidates = candidates.len(),
                scored = len,
                short_fields = %short_fields,
                "context shorter than batch; truncating"
            );
        }

        candidates[..len]
            .iter()
            .enumerate()
            .map(|(index, candidate)| self.score(candidate, &context.item(index)))
            .collect()
    }
}

pub(crate) fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreVector {
    pub scorer: &'static str,
    pub scores: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub scores: Vec<(&'static str, f64)>,
    pub total: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, scorer: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(name, _)| *name == scorer)
            .map(|(_, value)| *value)
    }
}

pub struct RewardEngine {
    config: RewardConfig,
    scorers: Vec<Box<dyn Scorer>>,
}

impl RewardEngine {
    pub fn new(config: RewardConfig) -> Result<Self> {
        config.validate()?;

        let scorers: Vec<Box<dyn Scorer>> = vec![
            Box::new(FormatScorer::new(config.format.clone())?),
            Box::new(LengthScorer::new(config.length.clone())),
            Box::new(ArtifactScorer::new(config.artifacts.clone())?),
            Box::new(DensityScorer::new(config.density.clone())),
            Box::new(CoverageScorer::new(config.coverage.clone())),
            Box::new(IncrementalValueScorer::new(config.incremental.clone())?),
            Box::new(GroundingScorer::new(config.grounding.clone())?),
            Box::new(StuffingScorer::new(config.stuffing.clone())),
        ];

        debug!(
            scorers = scorers.len(),
            artifact_patterns = config.artifacts.patterns.len(),
            "reward engine ready"
        );

        Ok(Self { config, scorers })
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    pub fn scorers(&self) -> impl Iterator<Item = &dyn Scorer> {
        self.scorers.iter().map(|scorer| scorer.as_ref())
    }

    pub fn scorer(&self, name: &str) -> Option<&dyn Scorer> {
        self.scorers().find(|scorer| scorer.name() == name)
    }

    pub fn score_batch(&self, candidates: &[String], context: &BatchContext) -> Vec<ScoreVector> {
        self.scorers
            .iter()
            .map(|scorer| ScoreVector {
                scorer: scorer.name(),
                scores: scorer.score_batch(candidates, context),
            })
            .collect()
    }

    pub fn score_item(&self, candidate: &str, item: &ItemContext<'_>) -> ScoreBreakdown {
        let scores = self
            .scorers
            .iter()
            .map(|scorer| (scorer.name(), scorer.score(candidate, item)))
            .collect::<Vec<(&'static str, f64)>>();
        let total = scores
            .iter()
            .map(|(name, value)| self.config.weights.for_scorer(name) * value)
            .sum();

        ScoreBreakdown { scores, total }
    }

    pub fn weighted_total(&self, vectors: &[ScoreVector]) -> Vec<f64> {
        let len = vectors
            .iter()
            .map(|vector| vector.scores.len())
            .min()
            .unwrap_or(0);

        (0..len)
            .map(|index| {
                vectors
                    .iter()
                    .map(|vector| {
                        self.config.weights.for_scorer(vector.scorer) * vector.scores[index]
                    })
                    .sum()
            })
            .collect()
    }
}

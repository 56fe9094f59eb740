use std::collections::HashSet;

use anyhow::Result;

use super::text::NumericPatterns;
use super::{ContextField, ItemContext, Scorer, finite_or};
use crate::config::GroundingConfig;

#[derive(Debug, Clone)]
pub struct GroundingScorer {
    config: GroundingConfig,
    numeric: NumericPatterns,
}

impl GroundingScorer {
    pub fn new(config: GroundingConfig) -> Result<Self> {
        Ok(Self {
            config,
            numeric: NumericPatterns::new()?,
        })
    }

    pub fn ungrounded(&self, candidate: &str, evidence: &str) -> (usize, usize) {
        let numbers = self.numeric.numbers(candidate);
        if numbers.is_empty() {
            return (0, 0);
        }

        let evidence_numbers = self
            .numeric
            .numbers(evidence)
            .into_iter()
            .collect::<HashSet<String>>();
        let bad = numbers
            .iter()
            .filter(|number| !evidence_numbers.contains(*number))
            .count();
        (numbers.len(), bad)
    }
}

impl Scorer for GroundingScorer {
    fn name(&self) -> &'static str {
        "grounding"
    }

    fn requires(&self) -> &'static [ContextField] {
        &[ContextField::EvidenceText]
    }

    fn score(&self, candidate: &str, item: &ItemContext<'_>) -> f64 {
        let (found, bad) = self.ungrounded(candidate, item.evidence_text);
        if found == 0 {
            return self.config.no_numbers_bonus;
        }

        let score = self.config.base - self.config.per_bad_penalty * bad as f64;
        finite_or(score, self.config.floor).max(self.config.floor)
    }
}

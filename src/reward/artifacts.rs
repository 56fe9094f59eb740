use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use super::{ItemContext, Scorer};
use crate::config::ArtifactConfig;

#[derive(Debug, Clone)]
pub struct ArtifactScorer {
    config: ArtifactConfig,
    patterns: Vec<Regex>,
}

impl ArtifactScorer {
    pub fn new(config: ArtifactConfig) -> Result<Self> {
        let patterns = config
            .patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .dot_matches_new_line(true)
                    .build()
                    .with_context(|| format!("failed to compile artifact pattern: {pattern}"))
            })
            .collect::<Result<Vec<Regex>>>()?;

        Ok(Self { config, patterns })
    }

    pub fn hit_count(&self, candidate: &str) -> usize {
        self.patterns
            .iter()
            .filter(|pattern| pattern.is_match(candidate))
            .count()
    }
}

impl Scorer for ArtifactScorer {
    fn name(&self) -> &'static str {
        "artifacts"
    }

    fn score(&self, candidate: &str, _item: &ItemContext<'_>) -> f64 {
        let hits = self.hit_count(candidate) as f64;
        (self.config.base - self.config.per_hit_penalty * hits).max(self.config.floor)
    }
}

use anyhow::{Context, Result};
use regex::Regex;

use super::{ItemContext, Scorer};
use crate::config::FormatConfig;

#[derive(Debug, Clone)]
pub struct FormatScorer {
    config: FormatConfig,
    pattern: Regex,
}

impl FormatScorer {
    pub fn new(config: FormatConfig) -> Result<Self> {
        let pattern = Regex::new(r"\AS:[ \t]*[^\s][^\r\n]*\r?\nV:[ \t]*[^\s][^\r\n]*\z")
            .context("failed to compile output format regex")?;
        Ok(Self { config, pattern })
    }

    pub fn is_well_formed(&self, candidate: &str) -> bool {
        let candidate = if self.config.allow_trailing_whitespace {
            candidate.trim()
        } else {
            candidate
        };
        self.pattern.is_match(candidate)
    }
}

impl Scorer for FormatScorer {
    fn name(&self) -> &'static str {
        "format"
    }

    fn score(&self, candidate: &str, _item: &ItemContext<'_>) -> f64 {
        if self.is_well_formed(candidate) {
            self.config.reward
        } else {
            self.config.penalty
        }
    }
}

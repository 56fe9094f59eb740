use super::{ItemContext, Scorer};
use crate::config::StuffingConfig;

#[derive(Debug, Clone)]
pub struct StuffingScorer {
    config: StuffingConfig,
}

impl StuffingScorer {
    pub fn new(config: StuffingConfig) -> Self {
        Self { config }
    }

    pub fn separator_count(candidate: &str) -> usize {
        candidate
            .chars()
            .filter(|character| matches!(character, ',' | ';'))
            .count()
    }
}

impl Scorer for StuffingScorer {
    fn name(&self) -> &'static str {
        "stuffing"
    }

    fn score(&self, candidate: &str, _item: &ItemContext<'_>) -> f64 {
        if Self::separator_count(candidate) > self.config.separator_threshold {
            self.config.penalty
        } else {
            self.config.neutral
        }
    }
}

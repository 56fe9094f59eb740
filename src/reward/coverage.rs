use super::text::{TermIndex, prepare_terms};
use super::{ContextField, ItemContext, Scorer, finite_or, parse_output};
use crate::config::CoverageConfig;

#[derive(Debug, Clone)]
pub struct CoverageScorer {
    config: CoverageConfig,
}

impl CoverageScorer {
    pub fn new(config: CoverageConfig) -> Self {
        Self { config }
    }

    pub fn hits(&self, summary: &str, salient_terms: &[String]) -> usize {
        let index = TermIndex::new(summary);
        prepare_terms(salient_terms, self.config.max_terms)
            .iter()
            .filter(|term| index.contains(term))
            .count()
    }
}

impl Scorer for CoverageScorer {
    fn name(&self) -> &'static str {
        "coverage"
    }

    fn requires(&self) -> &'static [ContextField] {
        &[ContextField::SalientTerms]
    }

    fn score(&self, candidate: &str, item: &ItemContext<'_>) -> f64 {
        let summary = parse_output(candidate).summary();
        if summary.is_empty() {
            return self.config.empty_penalty;
        }

        let hits = self.hits(summary, item.salient_terms) as f64;
        finite_or(
            self.config.base_weight * (hits / self.config.saturation).tanh()
                + self.config.linear_weight * hits,
            self.config.empty_penalty,
        )
    }
}

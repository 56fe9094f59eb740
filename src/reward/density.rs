use std::collections::BTreeMap;

use super::text::content_words;
use super::{ItemContext, Scorer, finite_or, parse_output};
use crate::config::DensityConfig;

#[derive(Debug, Default)]
struct WordMass {
    occurrences: usize,
    weight: f64,
    max_weight: f64,
}

// A single-word field is not redundant: unique ratio 1.0, no repetition penalty.
#[derive(Debug, Clone)]
pub struct DensityScorer {
    config: DensityConfig,
}

impl DensityScorer {
    pub fn new(config: DensityConfig) -> Self {
        Self { config }
    }

    pub fn ratios(&self, summary: &str, value: &str) -> Option<(f64, f64)> {
        let mut masses: BTreeMap<String, WordMass> = BTreeMap::new();
        let fields = [
            (summary, self.config.summary_weight),
            (value, self.config.value_weight),
        ];

        for (field, weight) in fields {
            for word in content_words(field) {
                let mass = masses.entry(word).or_default();
                mass.occurrences += 1;
                mass.weight += weight;
                mass.max_weight = mass.max_weight.max(weight);
            }
        }

        if masses.is_empty() {
            return None;
        }

        let total_weight = masses.values().map(|mass| mass.weight).sum::<f64>();
        if total_weight <= 0.0 {
            return None;
        }

        let unique_weight = masses.values().map(|mass| mass.max_weight).sum::<f64>();
        let unique_ratio = unique_weight / total_weight;

        let repetition = masses
            .values()
            .filter(|mass| mass.occurrences > 1)
            .map(|mass| mass.weight / total_weight)
            .fold(0.0_f64, f64::max);
        let repetition_penalty = (repetition - self.config.repeat_allowance).max(0.0);

        Some((unique_ratio, repetition_penalty))
    }
}

impl Scorer for DensityScorer {
    fn name(&self) -> &'static str {
        "density"
    }

    fn score(&self, candidate: &str, _item: &ItemContext<'_>) -> f64 {
        let parsed = parse_output(candidate);
        let Some((unique_ratio, repetition_penalty)) =
            self.ratios(parsed.summary(), parsed.value())
        else {
            return self.config.empty_penalty;
        };

        finite_or(
            self.config.unique_weight * unique_ratio
                - self.config.repeat_weight * repetition_penalty,
            self.config.empty_penalty,
        )
    }
}

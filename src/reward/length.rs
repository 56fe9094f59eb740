use super::text::estimate_tokens;
use super::{ContextField, ItemContext, Scorer, finite_or};
use crate::config::LengthConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthLimits {
    pub target_tokens: f64,
    pub min_tokens: f64,
    pub soft_max: f64,
    pub hard_max: f64,
}

#[derive(Debug, Clone)]
pub struct LengthScorer {
    config: LengthConfig,
}

impl LengthScorer {
    pub fn new(config: LengthConfig) -> Self {
        Self { config }
    }

    pub fn limits(&self, target_chars: f64, duration_seconds: f64) -> LengthLimits {
        let config = &self.config;
        let target_chars = if target_chars.is_finite() {
            target_chars.clamp(config.min_target_chars, config.max_target_chars)
        } else {
            config.min_target_chars
        };

        let target_tokens = (target_chars / config.chars_per_token)
            .clamp(config.min_target_tokens, config.max_target_tokens);
        let min_tokens = (config.min_tokens_fraction * target_tokens).max(config.min_tokens_floor);
        let hard_max = config.hard_slope * target_tokens + config.hard_offset;
        let mut soft_max = config.soft_slope * target_tokens + config.soft_offset;

        let relax_after = config.soft_max_disable_after_seconds;
        if relax_after > 0.0 && duration_seconds.is_finite() && duration_seconds >= relax_after {
            soft_max = hard_max;
        }

        LengthLimits {
            target_tokens,
            min_tokens,
            soft_max,
            hard_max,
        }
    }

    pub fn score_tokens(&self, tokens: f64, limits: &LengthLimits) -> f64 {
        let config = &self.config;

        if tokens > limits.hard_max {
            return config.hard_base - config.hard_penalty_per_token * (tokens - limits.hard_max);
        }

        if tokens < limits.min_tokens {
            let progress = tokens / limits.min_tokens.max(1.0);
            return config.short_floor * (1.0 - progress);
        }

        if tokens <= limits.soft_max {
            let distance = (tokens - limits.target_tokens).abs();
            return config.peak - distance / limits.target_tokens.max(1.0);
        }

        let span = (limits.hard_max - limits.soft_max).max(1.0);
        let excess = ((tokens - limits.soft_max) / span).min(1.0);
        config.soft_zone_start + (config.soft_zone_end - config.soft_zone_start) * excess
    }
}

impl Scorer for LengthScorer {
    fn name(&self) -> &'static str {
        "length"
    }

    fn requires(&self) -> &'static [ContextField] {
        &[ContextField::TargetChars]
    }

    fn score(&self, candidate: &str, item: &ItemContext<'_>) -> f64 {
        let limits = self.limits(item.target_chars, item.duration_seconds);
        let tokens = estimate_tokens(candidate.trim()) as f64;
        finite_or(self.score_tokens(tokens, &limits), self.config.hard_base)
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RewardConfig {
    pub config_version: u32,
    pub format: FormatConfig,
    pub length: LengthConfig,
    pub artifacts: ArtifactConfig,
    pub density: DensityConfig,
    pub coverage: CoverageConfig,
    pub incremental: IncrementalConfig,
    pub grounding: GroundingConfig,
    pub stuffing: StuffingConfig,
    pub weights: ScorerWeights,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            config_version: CONFIG_VERSION,
            format: FormatConfig::default(),
            length: LengthConfig::default(),
            artifacts: ArtifactConfig::default(),
            density: DensityConfig::default(),
            coverage: CoverageConfig::default(),
            incremental: IncrementalConfig::default(),
            grounding: GroundingConfig::default(),
            stuffing: StuffingConfig::default(),
            weights: ScorerWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormatConfig {
    pub reward: f64,
    pub penalty: f64,
    pub allow_trailing_whitespace: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            reward: 1.0,
            penalty: -3.0,
            allow_trailing_whitespace: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LengthConfig {
    pub min_target_chars: f64,
    pub max_target_chars: f64,
    pub chars_per_token: f64,
    pub min_target_tokens: f64,
    pub max_target_tokens: f64,
    pub min_tokens_floor: f64,
    pub min_tokens_fraction: f64,
    pub soft_slope: f64,
    pub soft_offset: f64,
    pub hard_slope: f64,
    pub hard_offset: f64,
    pub soft_max_disable_after_seconds: f64,
    pub peak: f64,
    pub short_floor: f64,
    pub soft_zone_start: f64,
    pub soft_zone_end: f64,
    pub hard_base: f64,
    pub hard_penalty_per_token: f64,
}

impl Default for LengthConfig {
    fn default() -> Self {
        Self {
            min_target_chars: 200.0,
            max_target_chars: 3000.0,
            chars_per_token: 4.0,
            min_target_tokens: 160.0,
            max_target_tokens: 900.0,
            min_tokens_floor: 40.0,
            min_tokens_fraction: 0.45,
            soft_slope: 1.2,
            soft_offset: 60.0,
            hard_slope: 1.55,
            hard_offset: 200.0,
            soft_max_disable_after_seconds: 1500.0,
            peak: 1.4,
            short_floor: -1.0,
            soft_zone_start: 0.5,
            soft_zone_end: -2.5,
            hard_base: -6.0,
            hard_penalty_per_token: 0.04,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtifactConfig {
    pub base: f64,
    pub per_hit_penalty: f64,
    pub floor: f64,
    pub patterns: Vec<String>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            base: 1.0,
            per_hit_penalty: 1.0,
            floor: -3.0,
            patterns: [
                r"\bit’s not\b.*\bit’s\b",
                r"\bit's not\b.*\bit's\b",
                r"\bas an ai\b",
                r"\bi(?:'| a)m an ai\b",
                r"\bthis video (?:dives|delves)\b",
                r"\bin (?:today'?s|this) video\b",
                r"\blet'?s dive\b",
                r"\bin summary\b",
                r"\bwatch (?:the )?(?:full )?video\b",
                r"\bto learn more\b",
                r"\bfor more details\b",
                r"\bthe rest of the video\b",
            ]
            .iter()
            .map(|pattern| pattern.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DensityConfig {
    pub summary_weight: f64,
    pub value_weight: f64,
    pub unique_weight: f64,
    pub repeat_weight: f64,
    pub repeat_allowance: f64,
    pub empty_penalty: f64,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            summary_weight: 1.0,
            value_weight: 0.8,
            unique_weight: 1.2,
            repeat_weight: 2.0,
            repeat_allowance: 0.12,
            empty_penalty: -1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoverageConfig {
    pub max_terms: usize,
    pub saturation: f64,
    pub base_weight: f64,
    pub linear_weight: f64,
    pub empty_penalty: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            max_terms: 20,
            saturation: 6.0,
            base_weight: 1.5,
            linear_weight: 0.05,
            empty_penalty: -1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IncrementalConfig {
    pub max_terms: usize,
    pub novel_weight: f64,
    pub backed_weight: f64,
    pub unbacked_penalty: f64,
    pub overlap_allowance: f64,
    pub overlap_weight: f64,
    pub visual_bonus: f64,
    pub empty_penalty: f64,
    pub clip_min: f64,
    pub clip_max: f64,
    pub evidence_visual_pattern: String,
    pub value_visual_pattern: String,
}

impl Default for IncrementalConfig {
    fn default() -> Self {
        Self {
            max_terms: 25,
            novel_weight: 0.25,
            backed_weight: 0.35,
            unbacked_penalty: 0.15,
            overlap_allowance: 0.35,
            overlap_weight: 1.0,
            visual_bonus: 0.4,
            empty_penalty: -1.5,
            clip_min: -3.0,
            clip_max: 3.0,
            evidence_visual_pattern: concat!(
                r"\b(?:on (?:the )?screen|as you can see|here'?s (?:a|the)|let'?s (?:look|open)|",
                r"diagram|chart|graph|demo|walkthrough|code|terminal|ui)\b"
            )
            .to_string(),
            value_visual_pattern:
                r"\b(?:visual|screen|diagram|chart|graph|demo|walkthrough|code|ui)\b".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroundingConfig {
    pub base: f64,
    pub per_bad_penalty: f64,
    pub no_numbers_bonus: f64,
    pub floor: f64,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            base: 0.5,
            per_bad_penalty: 0.8,
            no_numbers_bonus: 0.2,
            floor: -3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StuffingConfig {
    pub separator_threshold: usize,
    pub penalty: f64,
    pub neutral: f64,
}

impl Default for StuffingConfig {
    fn default() -> Self {
        Self {
            separator_threshold: 18,
            penalty: -2.0,
            neutral: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScorerWeights {
    pub format: f64,
    pub length: f64,
    pub artifacts: f64,
    pub density: f64,
    pub coverage: f64,
    pub incremental: f64,
    pub grounding: f64,
    pub stuffing: f64,
}

impl Default for ScorerWeights {
    fn default() -> Self {
        Self {
            format: 1.0,
            length: 1.0,
            artifacts: 1.0,
            density: 1.0,
            coverage: 1.0,
            incremental: 1.0,
            grounding: 1.0,
            stuffing: 1.0,
        }
    }
}

impl ScorerWeights {
    pub fn for_scorer(&self, name: &str) -> f64 {
        match name {
            "format" => self.format,
            "length" => self.length,
            "artifacts" => self.artifacts,
            "density" => self.density,
            "coverage" => self.coverage,
            "incremental" => self.incremental,
            "grounding" => self.grounding,
            "stuffing" => self.stuffing,
            _ => 0.0,
        }
    }

    fn values(&self) -> [(&'static str, f64); 8] {
        [
            ("weights.format", self.format),
            ("weights.length", self.length),
            ("weights.artifacts", self.artifacts),
            ("weights.density", self.density),
            ("weights.coverage", self.coverage),
            ("weights.incremental", self.incremental),
            ("weights.grounding", self.grounding),
            ("weights.stuffing", self.stuffing),
        ]
    }
}

impl RewardConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path)
            .with_context(|| format!("failed to read reward config: {}", path.display()))?;
        let config: Self = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse reward config: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("invalid reward config: {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.config_version != CONFIG_VERSION {
            bail!(
                "unsupported config_version {} (expected {})",
                self.config_version,
                CONFIG_VERSION
            );
        }

        for (name, value) in self.numeric_fields() {
            if !value.is_finite() {
                bail!("{name} must be finite, got {value}");
            }
        }

        let length = &self.length;
        if length.chars_per_token <= 0.0 {
            bail!("length.chars_per_token must be positive");
        }
        if length.min_target_chars <= 0.0 || length.min_target_chars > length.max_target_chars {
            bail!(
                "length target_chars band is empty: [{}, {}]",
                length.min_target_chars,
                length.max_target_chars
            );
        }
        if length.min_target_tokens <= 0.0 || length.min_target_tokens > length.max_target_tokens {
            bail!(
                "length target_tokens band is empty: [{}, {}]",
                length.min_target_tokens,
                length.max_target_tokens
            );
        }
        if length.min_tokens_floor <= 0.0 {
            bail!("length.min_tokens_floor must be positive");
        }
        if length.soft_zone_start < length.soft_zone_end {
            bail!("length soft zone must decrease from soft_zone_start to soft_zone_end");
        }

        // Both ends of the band are enough: every limit is affine in the target.
        for target in [length.min_target_tokens, length.max_target_tokens] {
            let min_tokens =
                (length.min_tokens_fraction * target).max(length.min_tokens_floor);
            let soft_max = length.soft_slope * target + length.soft_offset;
            let hard_max = length.hard_slope * target + length.hard_offset;
            if !(hard_max > soft_max && soft_max > min_tokens) {
                bail!(
                    "length limits must satisfy hard_max > soft_max > min_tokens \
                     (target={target}, min={min_tokens}, soft={soft_max}, hard={hard_max})"
                );
            }
            if target < min_tokens || target > soft_max {
                bail!("length target {target} must lie within [min_tokens, soft_max]");
            }
        }

        if self.coverage.saturation <= 0.0 {
            bail!("coverage.saturation must be positive");
        }
        if self.incremental.clip_min > self.incremental.clip_max {
            bail!(
                "incremental clip range is empty: [{}, {}]",
                self.incremental.clip_min,
                self.incremental.clip_max
            );
        }
        if self.density.summary_weight < 0.0 || self.density.value_weight < 0.0 {
            bail!("density field weights must be non-negative");
        }
        if self.density.summary_weight + self.density.value_weight <= 0.0 {
            bail!("density field weights must not both be zero");
        }

        Ok(())
    }

    fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        let length = &self.length;
        let mut fields = vec![
            ("format.reward", self.format.reward),
            ("format.penalty", self.format.penalty),
            ("length.min_target_chars", length.min_target_chars),
            ("length.max_target_chars", length.max_target_chars),
            ("length.chars_per_token", length.chars_per_token),
            ("length.min_target_tokens", length.min_target_tokens),
            ("length.max_target_tokens", length.max_target_tokens),
            ("length.min_tokens_floor", length.min_tokens_floor),
            ("length.min_tokens_fraction", length.min_tokens_fraction),
            ("length.soft_slope", length.soft_slope),
            ("length.soft_offset", length.soft_offset),
            ("length.hard_slope", length.hard_slope),
            ("length.hard_offset", length.hard_offset),
            (
                "length.soft_max_disable_after_seconds",
                length.soft_max_disable_after_seconds,
            ),
            ("length.peak", length.peak),
            ("length.short_floor", length.short_floor),
            ("length.soft_zone_start", length.soft_zone_start),
            ("length.soft_zone_end", length.soft_zone_end),
            ("length.hard_base", length.hard_base),
            ("length.hard_penalty_per_token", length.hard_penalty_per_token),
            ("artifacts.base", self.artifacts.base),
            ("artifacts.per_hit_penalty", self.artifacts.per_hit_penalty),
            ("artifacts.floor", self.artifacts.floor),
            ("density.summary_weight", self.density.summary_weight),
            ("density.value_weight", self.density.value_weight),
            ("density.unique_weight", self.density.unique_weight),
            ("density.repeat_weight", self.density.repeat_weight),
            ("density.repeat_allowance", self.density.repeat_allowance),
            ("density.empty_penalty", self.density.empty_penalty),
            ("coverage.saturation", self.coverage.saturation),
            ("coverage.base_weight", self.coverage.base_weight),
            ("coverage.linear_weight", self.coverage.linear_weight),
            ("coverage.empty_penalty", self.coverage.empty_penalty),
            ("incremental.novel_weight", self.incremental.novel_weight),
            ("incremental.backed_weight", self.incremental.backed_weight),
            ("incremental.unbacked_penalty", self.incremental.unbacked_penalty),
            ("incremental.overlap_allowance", self.incremental.overlap_allowance),
            ("incremental.overlap_weight", self.incremental.overlap_weight),
            ("incremental.visual_bonus", self.incremental.visual_bonus),
            ("incremental.empty_penalty", self.incremental.empty_penalty),
            ("incremental.clip_min", self.incremental.clip_min),
            ("incremental.clip_max", self.incremental.clip_max),
            ("grounding.base", self.grounding.base),
            ("grounding.per_bad_penalty", self.grounding.per_bad_penalty),
            ("grounding.no_numbers_bonus", self.grounding.no_numbers_bonus),
            ("grounding.floor", self.grounding.floor),
            ("stuffing.penalty", self.stuffing.penalty),
            ("stuffing.neutral", self.stuffing.neutral),
        ];
        fields.extend(self.weights.values());
        fields
    }
}

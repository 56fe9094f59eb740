use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use super::text::{TermIndex, content_words, prepare_terms};
use super::{ContextField, ItemContext, Scorer, finite_or, parse_output};
use crate::config::IncrementalConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermNovelty {
    pub novel: usize,
    pub backed: usize,
}

impl TermNovelty {
    pub fn unbacked(&self) -> usize {
        self.novel.saturating_sub(self.backed)
    }
}

#[derive(Debug, Clone)]
pub struct IncrementalValueScorer {
    config: IncrementalConfig,
    evidence_visual: Regex,
    value_visual: Regex,
}

fn case_insensitive(pattern: &str, label: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .with_context(|| format!("failed to compile {label} regex"))
}

impl IncrementalValueScorer {
    pub fn new(config: IncrementalConfig) -> Result<Self> {
        let evidence_visual = case_insensitive(&config.evidence_visual_pattern, "evidence visual")?;
        let value_visual = case_insensitive(&config.value_visual_pattern, "value visual")?;
        Ok(Self {
            config,
            evidence_visual,
            value_visual,
        })
    }

    pub fn novelty(
        &self,
        summary: &str,
        value: &str,
        evidence: &str,
        salient_terms: &[String],
    ) -> TermNovelty {
        let summary_index = TermIndex::new(summary);
        let value_index = TermIndex::new(value);
        let evidence_index = TermIndex::new(evidence);

        let mut novelty = TermNovelty::default();
        for term in prepare_terms(salient_terms, self.config.max_terms) {
            if !value_index.contains(&term) || summary_index.contains(&term) {
                continue;
            }
            novelty.novel += 1;
            if evidence_index.contains(&term) {
                novelty.backed += 1;
            }
        }
        novelty
    }

    // A value field without content words counts as a full restatement.
    pub fn overlap(summary: &str, value: &str) -> f64 {
        let summary_words = content_words(summary).into_iter().collect::<HashSet<String>>();
        let value_words = content_words(value).into_iter().collect::<HashSet<String>>();
        if value_words.is_empty() {
            return 1.0;
        }

        let shared = summary_words.intersection(&value_words).count();
        shared as f64 / value_words.len().max(1) as f64
    }

    pub fn has_visual_echo(&self, value: &str, evidence: &str) -> bool {
        self.value_visual.is_match(value) && self.evidence_visual.is_match(evidence)
    }
}

impl Scorer for IncrementalValueScorer {
    fn name(&self) -> &'static str {
        "incremental"
    }

    fn requires(&self) -> &'static [ContextField] {
        &[ContextField::SalientTerms, ContextField::EvidenceText]
    }

    fn score(&self, candidate: &str, item: &ItemContext<'_>) -> f64 {
        let parsed = parse_output(candidate);
        let (summary, value) = (parsed.summary(), parsed.value());
        if summary.is_empty() || value.is_empty() {
            return self.config.empty_penalty;
        }

        let config = &self.config;
        let novelty = self.novelty(summary, value, item.evidence_text, item.salient_terms);
        let mut score = config.novel_weight * novelty.novel as f64
            + config.backed_weight * novelty.backed as f64
            - config.unbacked_penalty * novelty.unbacked() as f64;

        if self.has_visual_echo(value, item.evidence_text) {
            score += config.visual_bonus;
        }

        let overlap = Self::overlap(summary, value);
        score -= config.overlap_weight * (overlap - config.overlap_allowance).max(0.0);

        finite_or(score, config.empty_penalty).clamp(config.clip_min, config.clip_max)
    }
}

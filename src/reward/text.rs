use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;

pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "when", "while", "to", "of", "in",
    "on", "for", "with", "is", "are", "was", "were", "be", "been", "being", "as", "at", "by",
    "from", "it", "this", "that", "these", "those", "you", "your", "we", "they", "their", "i",
    "me", "my", "our", "us", "he", "she", "him", "her", "them", "not", "do", "does", "did", "so",
    "just", "very", "can", "could", "should", "would", "may", "might", "will",
];

const MIN_CONTENT_WORD_CHARS: usize = 3;

fn is_word_char(character: char) -> bool {
    character.is_alphanumeric() || character == '\''
}

pub fn tokens(text: &str) -> Vec<String> {
    text.split(|character: char| !is_word_char(character))
        .map(|run| run.trim_matches('\''))
        .filter(|run| !run.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

pub fn content_words(text: &str) -> Vec<String> {
    tokens(text)
        .into_iter()
        .filter(|token| !is_stopword(token) && token.chars().count() >= MIN_CONTENT_WORD_CHARS)
        .collect()
}

pub fn condense_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}

pub fn estimate_tokens(text: &str) -> usize {
    #[derive(PartialEq)]
    enum Run {
        Space,
        Word,
        Punct,
    }

    let mut count = 0usize;
    let mut previous = Run::Space;
    for character in text.chars() {
        let current = if character.is_whitespace() {
            Run::Space
        } else if is_word_char(character) || character == '_' {
            Run::Word
        } else {
            Run::Punct
        };

        if current != Run::Space && current != previous {
            count += 1;
        }
        previous = current;
    }
    count
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SalientTerm {
    // Whole tokens only: "art" never hits "started".
    Word(String),
    Phrase(String),
}

impl SalientTerm {
    pub fn new(raw: &str) -> Option<Self> {
        let lowered = condense_whitespace(&raw.to_lowercase());
        let mut term_tokens = tokens(&lowered);
        if term_tokens.is_empty() {
            return None;
        }

        if term_tokens.len() == 1 && term_tokens[0] == lowered {
            return term_tokens.pop().map(Self::Word);
        }
        Some(Self::Phrase(lowered))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Word(word) => word,
            Self::Phrase(phrase) => phrase,
        }
    }
}

pub fn prepare_terms(raw_terms: &[String], max_terms: usize) -> Vec<SalientTerm> {
    let mut seen = HashSet::new();
    raw_terms
        .iter()
        .filter_map(|raw| SalientTerm::new(raw))
        .filter(|term| seen.insert(term.clone()))
        .take(max_terms)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct TermIndex {
    condensed: String,
    tokens: HashSet<String>,
}

impl TermIndex {
    pub fn new(text: &str) -> Self {
        let condensed = condense_whitespace(&text.to_lowercase());
        let tokens = tokens(&condensed).into_iter().collect();
        Self { condensed, tokens }
    }

    pub fn contains(&self, term: &SalientTerm) -> bool {
        match term {
            SalientTerm::Word(word) => self.tokens.contains(word),
            SalientTerm::Phrase(phrase) => self.condensed.contains(phrase.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumericPatterns {
    thousands: Regex,
    percent_word: Regex,
    percent_gap: Regex,
    number: Regex,
}

impl NumericPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            thousands: Regex::new(r"(\d),(\d{3})\b")
                .context("failed to compile thousands separator regex")?,
            percent_word: Regex::new(r"(?i)(\d)\s*(?:percent|per cent)\b")
                .context("failed to compile percent word regex")?,
            percent_gap: Regex::new(r"(\d)\s+%").context("failed to compile percent gap regex")?,
            number: Regex::new(r"\b\d+(?:\.\d+)?(?:%|\b)")
                .context("failed to compile number regex")?,
        })
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = text.to_string();
        // "1,000,000" needs one pass per separator group since matches cannot overlap.
        loop {
            let next = self.thousands.replace_all(&normalized, "$1$2").into_owned();
            if next == normalized {
                break;
            }
            normalized = next;
        }
        let normalized = self.percent_word.replace_all(&normalized, "$1%");
        self.percent_gap.replace_all(&normalized, "$1%").into_owned()
    }

    pub fn numbers(&self, text: &str) -> Vec<String> {
        let normalized = self.normalize(text);
        self.number
            .find_iter(&normalized)
            .map(|found| found.as_str().to_string())
            .collect()
    }
}

// src/sentiment.rs
//! Lexicon-based sentiment classifier.
//!
//! Two disjoint indicator term sets; the label is decided by the count
//! difference. Tie-break is fixed and documented because it is the most
//! ambiguity-prone behavior here: score > 0 → positive, score < 0 →
//! negative, score == 0 (including zero matches on both sides) → neutral.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::normalize::Token;
use crate::types::Sentiment;

#[derive(Debug, Deserialize)]
struct SentimentTermsFile {
    positive: Vec<String>,
    negative: Vec<String>,
}

/// Immutable positive/negative indicator sets, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl SentimentClassifier {
    /// Build from raw term lists. Terms are trimmed, lowercased and
    /// deduplicated. Terms appearing on both sides carry no signal and are
    /// removed from both, with a warning; either set ending up empty is an
    /// error (fail-fast at startup, not silent degradation).
    pub fn from_terms(positive: Vec<String>, negative: Vec<String>) -> Result<Self> {
        let mut pos = clean_set(positive);
        let mut neg = clean_set(negative);

        let overlap: Vec<String> = pos.intersection(&neg).cloned().collect();
        if !overlap.is_empty() {
            warn!(terms = ?overlap, "sentiment terms on both sides, dropping from both");
            for t in &overlap {
                pos.remove(t);
                neg.remove(t);
            }
        }

        if pos.is_empty() || neg.is_empty() {
            return Err(anyhow!(
                "sentiment term sets must both be non-empty (positive: {}, negative: {})",
                pos.len(),
                neg.len()
            ));
        }
        Ok(Self {
            positive: pos,
            negative: neg,
        })
    }

    /// Load from a TOML file with `positive = [...]` / `negative = [...]`
    /// arrays, or an equivalent JSON object.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading sentiment terms from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let raw: SentimentTermsFile = if ext == "json" {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing JSON sentiment terms {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("parsing TOML sentiment terms {}", path.display()))?
        };
        Self::from_terms(raw.positive, raw.negative)
    }

    /// score = count(positive matches) − count(negative matches), over every
    /// token occurrence.
    pub fn classify(&self, tokens: &[Token]) -> Sentiment {
        let mut score: i64 = 0;
        for tok in tokens {
            if self.positive.contains(&tok.norm) {
                score += 1;
            } else if self.negative.contains(&tok.norm) {
                score -= 1;
            }
        }
        match score {
            s if s > 0 => Sentiment::Positive,
            s if s < 0 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn term_counts(&self) -> (usize, usize) {
        (self.positive.len(), self.negative.len())
    }
}

fn clean_set(terms: Vec<String>) -> HashSet<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

// src/rarity.rs
//! Rarity table: normalized word → rarity score, higher = rarer.
//!
//! Words absent from the table are treated as maximally rare — an unknown
//! word always outranks every known one. Ties break to the earliest
//! occurrence in original text order, which keeps the result stable across
//! runs.

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::normalize::Token;

/// Immutable word → rarity-score mapping, loaded once at startup.
#[derive(Debug, Clone)]
pub struct RarityTable {
    scores: HashMap<String, f64>,
}

impl RarityTable {
    /// Build from raw scores. Keys are trimmed and lowercased; an empty
    /// table is rejected (fail-fast at startup).
    pub fn from_scores(raw: HashMap<String, f64>) -> Result<Self> {
        let scores: HashMap<String, f64> = raw
            .into_iter()
            .map(|(w, s)| (w.trim().to_lowercase(), s))
            .filter(|(w, _)| !w.is_empty())
            .collect();
        if scores.is_empty() {
            return Err(anyhow!("rarity table is empty"));
        }
        Ok(Self { scores })
    }

    /// Load from a JSON object of word → score.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading rarity table from {}", path.display()))?;
        let raw: HashMap<String, f64> = serde_json::from_str(&content)
            .with_context(|| format!("parsing rarity table {}", path.display()))?;
        Self::from_scores(raw)
    }

    /// Rarity score for a normalized word; unknown words are maximally rare.
    pub fn score(&self, word: &str) -> f64 {
        self.scores.get(word).copied().unwrap_or(f64::INFINITY)
    }

    /// Pick the rarest token. Returns the raw (original-cased) form of the
    /// winner; `None` only for an empty token sequence. Strict `>` on the
    /// running maximum is what gives the first occurrence the tie win.
    pub fn rarest(&self, tokens: &[Token]) -> Option<String> {
        let mut best: Option<(f64, &Token)> = None;
        for tok in tokens {
            let s = self.score(&tok.norm);
            match best {
                Some((bs, _)) if s <= bs => {}
                _ => best = Some((s, tok)),
            }
        }
        best.map(|(_, tok)| tok.raw.clone())
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

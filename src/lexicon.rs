// src/lexicon.rs
//! Category lexicon and the weapon detector built on top of it.
//!
//! A lexicon maps a category name ("weapon") to a set of normalized trigger
//! terms. Matching is whole-token and case-insensitive; substrings inside
//! unrelated words never match ("gunner" does not trigger on "gun").

use anyhow::{anyhow, Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::normalize::Token;

pub const WEAPON_CATEGORY: &str = "weapon";

/// Immutable category → trigger-term-set mapping, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Lexicon {
    categories: HashMap<String, HashSet<String>>,
}

impl Lexicon {
    /// Build from raw category lists. Terms are trimmed, lowercased and
    /// deduplicated; empty terms are dropped.
    pub fn from_map(raw: HashMap<String, Vec<String>>) -> Self {
        let categories = raw
            .into_iter()
            .map(|(cat, terms)| {
                let set = terms
                    .iter()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect::<HashSet<String>>();
                (cat.trim().to_lowercase(), set)
            })
            .collect();
        Self { categories }
    }

    /// Load from a TOML table of arrays (`weapon = ["gun", ...]`) or an
    /// equivalent JSON object.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let raw: HashMap<String, Vec<String>> = if ext == "json" {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing JSON lexicon {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("parsing TOML lexicon {}", path.display()))?
        };
        Ok(Self::from_map(raw))
    }

    pub fn category(&self, name: &str) -> Option<&HashSet<String>> {
        self.categories.get(name)
    }

    /// Total number of trigger terms across all categories.
    pub fn term_count(&self) -> usize {
        self.categories.values().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.term_count() == 0
    }
}

/// Scans token sequences against the lexicon's weapon category.
#[derive(Debug, Clone)]
pub struct WeaponDetector {
    triggers: HashSet<String>,
}

impl WeaponDetector {
    /// Fails when the lexicon has no non-empty weapon category: an empty
    /// trigger set at startup means misconfiguration, not "no weapons".
    pub fn from_lexicon(lexicon: &Lexicon) -> Result<Self> {
        let triggers = lexicon
            .category(WEAPON_CATEGORY)
            .filter(|s| !s.is_empty())
            .cloned()
            .ok_or_else(|| anyhow!("lexicon has no '{WEAPON_CATEGORY}' category terms"))?;
        Ok(Self { triggers })
    }

    #[cfg(test)]
    pub fn from_terms<I: IntoIterator<Item = S>, S: Into<String>>(terms: I) -> Self {
        Self {
            triggers: terms.into_iter().map(|t| t.into().to_lowercase()).collect(),
        }
    }

    /// Whole-token match of normalized tokens against the trigger set.
    /// Output preserves order of first occurrence; duplicates suppressed.
    /// Empty input yields empty output.
    pub fn detect(&self, tokens: &[Token]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut matched = Vec::new();
        for tok in tokens {
            if self.triggers.contains(&tok.norm) && seen.insert(tok.norm.as_str()) {
                matched.push(tok.norm.clone());
            }
        }
        matched
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }
}

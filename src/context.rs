// src/context.rs
//! Process-wide reference data: lexicon, sentiment terms, rarity table.
//!
//! Everything is loaded fully before the first analysis and never mutated
//! afterwards. The context is passed explicitly (no ambient globals), so
//! the analyzer stays a pure function of (record, context).

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::lexicon::{Lexicon, WeaponDetector};
use crate::rarity::RarityTable;
use crate::sentiment::SentimentClassifier;

pub const DEFAULT_WEAPON_LEXICON_PATH: &str = "config/weapon_lexicon.toml";
pub const DEFAULT_SENTIMENT_TERMS_PATH: &str = "config/sentiment_terms.toml";
pub const DEFAULT_RARITY_TABLE_PATH: &str = "config/word_frequencies.json";

pub const ENV_WEAPON_LEXICON_PATH: &str = "WEAPON_LEXICON_PATH";
pub const ENV_SENTIMENT_TERMS_PATH: &str = "SENTIMENT_TERMS_PATH";
pub const ENV_RARITY_TABLE_PATH: &str = "RARITY_TABLE_PATH";

/// Immutable reference data shared by all analyses.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub lexicon: Lexicon,
    pub detector: WeaponDetector,
    pub sentiment: SentimentClassifier,
    pub rarity: RarityTable,
}

impl AnalysisContext {
    /// Load all reference data from explicit paths. Any unreadable,
    /// unparseable, or empty input is fatal here: the core refuses to
    /// analyze anything until the data is fixed.
    pub fn load_from_paths(
        lexicon_path: &Path,
        sentiment_path: &Path,
        rarity_path: &Path,
    ) -> Result<Self> {
        let lexicon = Lexicon::load_from(lexicon_path)
            .with_context(|| format!("loading weapon lexicon {}", lexicon_path.display()))?;
        let detector = WeaponDetector::from_lexicon(&lexicon)?;
        let sentiment = SentimentClassifier::load_from(sentiment_path)
            .with_context(|| format!("loading sentiment terms {}", sentiment_path.display()))?;
        let rarity = RarityTable::load_from(rarity_path)
            .with_context(|| format!("loading rarity table {}", rarity_path.display()))?;

        let (pos, neg) = sentiment.term_counts();
        info!(
            weapon_terms = detector.trigger_count(),
            positive_terms = pos,
            negative_terms = neg,
            rarity_words = rarity.len(),
            "reference data loaded"
        );

        Ok(Self {
            lexicon,
            detector,
            sentiment,
            rarity,
        })
    }

    /// Load using env-var overrides with the `config/` defaults.
    pub fn load_default() -> Result<Self> {
        Self::load_from_paths(
            &env_path(ENV_WEAPON_LEXICON_PATH, DEFAULT_WEAPON_LEXICON_PATH),
            &env_path(ENV_SENTIMENT_TERMS_PATH, DEFAULT_SENTIMENT_TERMS_PATH),
            &env_path(ENV_RARITY_TABLE_PATH, DEFAULT_RARITY_TABLE_PATH),
        )
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn loads_from_explicit_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let lex = write(tmp.path(), "lex.toml", r#"weapon = ["gun", "rifle"]"#);
        let sent = write(
            tmp.path(),
            "sent.toml",
            "positive = [\"love\"]\nnegative = [\"hate\"]\n",
        );
        let rar = write(tmp.path(), "rar.json", r#"{"the": 1.0, "gun": 80.0}"#);

        let ctx = AnalysisContext::load_from_paths(&lex, &sent, &rar).unwrap();
        assert_eq!(ctx.detector.trigger_count(), 2);
        assert_eq!(ctx.rarity.len(), 2);
    }

    #[test]
    fn missing_file_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let lex = write(tmp.path(), "lex.toml", r#"weapon = ["gun"]"#);
        let sent = write(
            tmp.path(),
            "sent.toml",
            "positive = [\"love\"]\nnegative = [\"hate\"]\n",
        );
        let missing = tmp.path().join("nope.json");
        assert!(AnalysisContext::load_from_paths(&lex, &sent, &missing).is_err());
    }

    #[test]
    fn empty_reference_data_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let lex = write(tmp.path(), "lex.toml", r#"weapon = []"#);
        let sent = write(
            tmp.path(),
            "sent.toml",
            "positive = [\"love\"]\nnegative = [\"hate\"]\n",
        );
        let rar = write(tmp.path(), "rar.json", r#"{"the": 1.0}"#);
        assert!(AnalysisContext::load_from_paths(&lex, &sent, &rar).is_err());

        let rar_empty = write(tmp.path(), "rar_empty.json", r#"{}"#);
        let lex_ok = write(tmp.path(), "lex_ok.toml", r#"weapon = ["gun"]"#);
        assert!(AnalysisContext::load_from_paths(&lex_ok, &sent, &rar_empty).is_err());
    }

    #[serial_test::serial]
    #[test]
    fn env_overrides_take_precedence_over_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let lex = write(tmp.path(), "lex.toml", r#"weapon = ["dagger"]"#);
        let sent = write(
            tmp.path(),
            "sent.toml",
            "positive = [\"calm\"]\nnegative = [\"grim\"]\n",
        );
        let rar = write(tmp.path(), "rar.json", r#"{"a": 1.0}"#);

        std::env::set_var(ENV_WEAPON_LEXICON_PATH, lex.display().to_string());
        std::env::set_var(ENV_SENTIMENT_TERMS_PATH, sent.display().to_string());
        std::env::set_var(ENV_RARITY_TABLE_PATH, rar.display().to_string());

        let ctx = AnalysisContext::load_default().unwrap();
        assert_eq!(ctx.detector.trigger_count(), 1);

        std::env::remove_var(ENV_WEAPON_LEXICON_PATH);
        std::env::remove_var(ENV_SENTIMENT_TERMS_PATH);
        std::env::remove_var(ENV_RARITY_TABLE_PATH);
    }
}

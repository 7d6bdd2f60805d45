// src/normalize.rs
//! Tokenizer shared by all three analyses. Normalization happens exactly
//! once per record; the sub-analyses all consume the same token sequence.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AnalysisError;

// \w covers [A-Za-z0-9_]; (?u) enables Unicode
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w+\b").expect("tokenizer regex"));

/// One normalized token. `raw` keeps the original casing so signals that
/// report a word back to the caller (rarest word) can echo it as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub raw: String,
    pub norm: String,
    pub index: usize, // 0-based token index in the sequence
}

/// Split text into lowercase, punctuation-stripped tokens in original order.
///
/// Empty text yields an empty sequence, never an error. The only failure
/// mode is input that cannot be treated as cleanly decoded: U+FFFD left by
/// a lossy upstream decode, or an embedded NUL.
pub fn normalize(text: &str) -> Result<Vec<Token>, AnalysisError> {
    if let Some(bad) = text.chars().find(|c| *c == '\u{FFFD}' || *c == '\0') {
        return Err(AnalysisError::MalformedInput {
            detail: format!("text contains {bad:?}"),
        });
    }

    let mut out = Vec::new();
    for (i, m) in TOKEN_RE.find_iter(text).enumerate() {
        let raw = m.as_str().to_string();
        out.push(Token {
            norm: raw.to_lowercase(),
            raw,
            index: i,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norms(text: &str) -> Vec<String> {
        normalize(text).unwrap().into_iter().map(|t| t.norm).collect()
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(norms("Hello, World!"), vec!["hello", "world"]);
        assert_eq!(norms("a.b,c;d"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn preserves_order_and_raw_form() {
        let toks = normalize("Tomorrow we attack").unwrap();
        assert_eq!(toks[0].raw, "Tomorrow");
        assert_eq!(toks[0].norm, "tomorrow");
        assert_eq!(toks[2].index, 2);
    }

    #[test]
    fn empty_and_punctuation_only_text_yield_empty_sequence() {
        assert!(normalize("").unwrap().is_empty());
        assert!(normalize("?! ... --").unwrap().is_empty());
    }

    #[test]
    fn replacement_char_and_nul_are_malformed() {
        assert!(normalize("broken \u{FFFD} text").is_err());
        assert!(normalize("nul\0byte").is_err());
    }
}

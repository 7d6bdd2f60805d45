// src/types.rs
//! Input/output record types and their wire shape.

use serde::{Deserialize, Serialize};

/// One raw record as supplied by the record source. `id` is opaque; the
/// core does not enforce uniqueness within a batch (caller's concern).
/// `original_text` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    // Aliases keep raw exports from the upstream document store loadable
    // without a rename pass (`_id` / `Text` field names).
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "Text")]
    pub original_text: String,
}

impl InputRecord {
    pub fn new(id: impl Into<String>, original_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            original_text: original_text.into(),
        }
    }
}

/// Coarse sentiment polarity. Flat label only; no confidence is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// One annotated record: the original input plus the three derived signals.
///
/// Wire shape (consumed by existing clients, do not change):
/// `id` string, `original_text` string, `rarest_word` string-or-null,
/// `sentiment` one of "positive"/"negative"/"neutral", and
/// `weapons_detected` a single comma-joined string ("" when none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedRecord {
    pub id: String,
    pub original_text: String,
    pub rarest_word: Option<String>,
    pub sentiment: Sentiment,
    #[serde(serialize_with = "comma_joined")]
    pub weapons_detected: Vec<String>,
}

fn comma_joined<S>(terms: &[String], ser: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    ser.serialize_str(&terms.join(","))
}

// src/error.rs
//! Per-record analysis errors. Reference-data load failures are surfaced
//! separately via `anyhow` at startup; nothing in here is retried.

use serde::Serialize;

/// Error produced while analyzing a single record. Captured at the batch
/// boundary and tagged with the offending record id; never aborts a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    /// The text could not be treated as cleanly decoded input.
    /// We only ever see valid UTF-8 here, so this fires on leftovers of a
    /// lossy upstream decode (U+FFFD) or embedded NULs.
    MalformedInput { detail: String },
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::MalformedInput { detail } => {
                write!(f, "malformed input: {detail}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

// src/source.rs
//! Startup record source. The real document store sits behind a thin
//! collaborator boundary; here records arrive as a JSON export read once
//! at startup. The core never sees query filters or pagination.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::types::InputRecord;

pub const DEFAULT_RECORDS_PATH: &str = "config/records.json";
pub const ENV_RECORDS_PATH: &str = "RECORDS_PATH";

/// Load records from an explicit JSON file (array of objects; upstream
/// `_id`/`Text` field names are accepted alongside `id`/`original_text`).
pub fn load_records_from(path: &Path) -> Result<Vec<InputRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading records from {}", path.display()))?;
    let records: Vec<InputRecord> = serde_json::from_str(&content)
        .with_context(|| format!("parsing records {}", path.display()))?;
    info!(count = records.len(), path = %path.display(), "records loaded");
    Ok(records)
}

/// Load records using `$RECORDS_PATH` with the `config/` default.
pub fn load_records_default() -> Result<Vec<InputRecord>> {
    let path = std::env::var(ENV_RECORDS_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_RECORDS_PATH));
    load_records_from(&path)
}

// src/analyzer.rs
//! # Record Analyzer
//! Pure, testable logic that maps `(record, context)` → `AnnotatedRecord`.
//! No I/O, suitable for unit tests and offline evaluation.
//!
//! The text is normalized exactly once and the same token sequence feeds
//! all three sub-analyses; none of them re-tokenizes on its own.

use std::sync::Arc;

use crate::context::AnalysisContext;
use crate::error::AnalysisError;
use crate::normalize::normalize;
use crate::types::{AnnotatedRecord, InputRecord};

/// Runs the three fixed analyses over one record.
#[derive(Debug, Clone)]
pub struct RecordAnalyzer {
    ctx: Arc<AnalysisContext>,
}

impl RecordAnalyzer {
    pub fn new(ctx: Arc<AnalysisContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.ctx
    }

    /// Annotate one record. Deterministic: identical input yields an
    /// identical output. Empty text is not an error; it annotates to
    /// no weapons, neutral sentiment, and no rarest word. The only
    /// failure is malformed text (see `AnalysisError`).
    pub fn analyze(&self, record: &InputRecord) -> Result<AnnotatedRecord, AnalysisError> {
        let tokens = normalize(&record.original_text)?;

        let weapons_detected = self.ctx.detector.detect(&tokens);
        let sentiment = self.ctx.sentiment.classify(&tokens);
        let rarest_word = self.ctx.rarity.rarest(&tokens);

        Ok(AnnotatedRecord {
            id: record.id.clone(),
            original_text: record.original_text.clone(),
            rarest_word,
            sentiment,
            weapons_detected,
        })
    }
}

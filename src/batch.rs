// src/batch.rs
//! # Batch Processor
//! Applies the record analyzer over an ordered sequence of records.
//!
//! Partial-failure policy: a record that fails to analyze is captured as a
//! tagged per-item error in its slot; the batch never aborts. Output order
//! always matches input order, including in parallel mode. Re-running over
//! the same input yields an identical output sequence.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::analyzer::RecordAnalyzer;
use crate::error::AnalysisError;
use crate::types::{AnnotatedRecord, InputRecord, Sentiment};

/// Per-slot batch result: the annotated record, or the error tagged with
/// the offending record id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Annotated(AnnotatedRecord),
    Failed { id: String, error: AnalysisError },
}

impl BatchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, BatchOutcome::Failed { .. })
    }
}

/// Cooperative cancellation shared between the caller and batch workers.
/// Checked between items; a single record's analysis is never interrupted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Worker-pool knobs. `workers <= 1` keeps processing on the calling thread.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub workers: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

#[derive(Debug, Clone)]
pub struct BatchProcessor {
    analyzer: RecordAnalyzer,
    opts: BatchOptions,
}

impl BatchProcessor {
    pub fn new(analyzer: RecordAnalyzer) -> Self {
        Self {
            analyzer,
            opts: BatchOptions::default(),
        }
    }

    pub fn with_options(analyzer: RecordAnalyzer, opts: BatchOptions) -> Self {
        Self { analyzer, opts }
    }

    pub fn analyzer(&self) -> &RecordAnalyzer {
        &self.analyzer
    }

    /// Process the whole sequence, preserving input order.
    pub fn process(&self, records: &[InputRecord]) -> Vec<BatchOutcome> {
        self.process_with_cancel(records, &CancelToken::new())
    }

    /// Process with cooperative cancellation. A cancelled batch returns the
    /// contiguous prefix of outcomes completed before the token was seen.
    pub fn process_with_cancel(
        &self,
        records: &[InputRecord],
        cancel: &CancelToken,
    ) -> Vec<BatchOutcome> {
        let outcomes = if self.opts.workers > 1 && records.len() > 1 {
            self.process_parallel(records, cancel)
        } else {
            self.process_sequential(records, cancel)
        };
        log_summary(&outcomes, records.len());
        outcomes
    }

    fn process_sequential(
        &self,
        records: &[InputRecord],
        cancel: &CancelToken,
    ) -> Vec<BatchOutcome> {
        let mut out = Vec::with_capacity(records.len());
        for rec in records {
            if cancel.is_cancelled() {
                break;
            }
            out.push(self.analyze_one(rec));
        }
        out
    }

    /// Records are split into contiguous chunks, one scoped worker thread
    /// per chunk, each writing into its own slice of the result buffer.
    /// Reassembly is positional, so input order survives parallelism.
    fn process_parallel(&self, records: &[InputRecord], cancel: &CancelToken) -> Vec<BatchOutcome> {
        let workers = self.opts.workers.min(records.len());
        let chunk_size = records.len().div_ceil(workers);

        let mut slots: Vec<Option<BatchOutcome>> = vec![None; records.len()];
        std::thread::scope(|scope| {
            for (rec_chunk, slot_chunk) in records
                .chunks(chunk_size)
                .zip(slots.chunks_mut(chunk_size))
            {
                scope.spawn(move || {
                    for (rec, slot) in rec_chunk.iter().zip(slot_chunk.iter_mut()) {
                        if cancel.is_cancelled() {
                            break;
                        }
                        *slot = Some(self.analyze_one(rec));
                    }
                });
            }
        });

        // On cancellation some slots stay empty; emit the contiguous
        // completed prefix so the output is still an ordered sequence.
        slots.into_iter().map_while(|s| s).collect()
    }

    fn analyze_one(&self, rec: &InputRecord) -> BatchOutcome {
        match self.analyzer.analyze(rec) {
            Ok(annotated) => BatchOutcome::Annotated(annotated),
            Err(error) => {
                debug!(id = %rec.id, %error, "record failed analysis");
                BatchOutcome::Failed {
                    id: rec.id.clone(),
                    error,
                }
            }
        }
    }
}

fn log_summary(outcomes: &[BatchOutcome], input_len: usize) {
    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut neutral = 0usize;
    let mut with_weapons = 0usize;
    let mut failed = 0usize;

    for o in outcomes {
        match o {
            BatchOutcome::Annotated(a) => {
                match a.sentiment {
                    Sentiment::Positive => positive += 1,
                    Sentiment::Negative => negative += 1,
                    Sentiment::Neutral => neutral += 1,
                }
                if !a.weapons_detected.is_empty() {
                    with_weapons += 1;
                }
            }
            BatchOutcome::Failed { .. } => failed += 1,
        }
    }

    info!(
        input = input_len,
        annotated = outcomes.len() - failed,
        failed,
        positive,
        negative,
        neutral,
        with_weapons,
        "batch processed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AnalysisContext;
    use crate::lexicon::{Lexicon, WeaponDetector};
    use crate::rarity::RarityTable;
    use crate::sentiment::SentimentClassifier;
    use std::collections::HashMap;

    fn analyzer() -> RecordAnalyzer {
        let lexicon = Lexicon::from_map(HashMap::from([(
            "weapon".to_string(),
            vec!["gun".to_string()],
        )]));
        let detector = WeaponDetector::from_lexicon(&lexicon).unwrap();
        let sentiment =
            SentimentClassifier::from_terms(vec!["love".into()], vec!["attack".into()]).unwrap();
        let rarity = RarityTable::from_scores(HashMap::from([("the".to_string(), 1.0)])).unwrap();
        RecordAnalyzer::new(Arc::new(AnalysisContext {
            lexicon,
            detector,
            sentiment,
            rarity,
        }))
    }

    fn records() -> Vec<InputRecord> {
        vec![
            InputRecord::new("r1", "we love the calm"),
            InputRecord::new("r2", "broken \u{FFFD} record"),
            InputRecord::new("r3", "they attack with a gun"),
        ]
    }

    #[test]
    fn order_preserved_and_failure_does_not_abort_batch() {
        let out = BatchProcessor::new(analyzer()).process(&records());
        assert_eq!(out.len(), 3);

        match &out[0] {
            BatchOutcome::Annotated(a) => assert_eq!(a.id, "r1"),
            other => panic!("expected annotated r1, got {other:?}"),
        }
        match &out[1] {
            BatchOutcome::Failed { id, error } => {
                assert_eq!(id, "r2");
                assert!(matches!(error, AnalysisError::MalformedInput { .. }));
            }
            other => panic!("expected failed r2, got {other:?}"),
        }
        match &out[2] {
            BatchOutcome::Annotated(a) => {
                assert_eq!(a.id, "r3");
                assert_eq!(a.weapons_detected, vec!["gun"]);
            }
            other => panic!("expected annotated r3, got {other:?}"),
        }
    }

    #[test]
    fn rerun_yields_identical_output() {
        let proc = BatchProcessor::new(analyzer());
        let recs = records();
        assert_eq!(proc.process(&recs), proc.process(&recs));
    }

    #[test]
    fn parallel_output_matches_sequential() {
        let recs: Vec<InputRecord> = (0..37)
            .map(|i| InputRecord::new(format!("id-{i}"), format!("record number {i} with a gun")))
            .collect();
        let sequential = BatchProcessor::new(analyzer()).process(&recs);
        let parallel =
            BatchProcessor::with_options(analyzer(), BatchOptions { workers: 4 }).process(&recs);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn empty_batch_yields_empty_output() {
        assert!(BatchProcessor::new(analyzer()).process(&[]).is_empty());
    }

    #[test]
    fn pre_cancelled_batch_processes_nothing() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let out = BatchProcessor::new(analyzer()).process_with_cancel(&records(), &cancel);
        assert!(out.is_empty());
    }

    #[test]
    fn batch_output_serializes_failed_slot_with_tagged_error() {
        let out = BatchProcessor::new(analyzer()).process(&records());
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v[1]["id"], "r2");
        assert_eq!(v[1]["error"]["kind"], "malformed_input");
        assert_eq!(v[2]["weapons_detected"], "gun");
    }
}

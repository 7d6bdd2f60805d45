// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod analyzer;
pub mod api;
pub mod batch;
pub mod context;
pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod rarity;
pub mod sentiment;
pub mod source;
pub mod types;

// ---- Re-exports for stable public API ----
pub use crate::analyzer::RecordAnalyzer;
pub use crate::api::{create_router, AppState};
pub use crate::batch::{BatchOptions, BatchOutcome, BatchProcessor, CancelToken};
pub use crate::context::AnalysisContext;
pub use crate::error::AnalysisError;
pub use crate::types::{AnnotatedRecord, InputRecord, Sentiment};

//! Tweet Threat Analyzer — Binary Entrypoint
//! Boots the Axum HTTP server: loads reference data, annotates the startup
//! record set, and wires routes plus shared state.
//!
//! Reference-data failures are fatal; a missing record source is not — the
//! service then runs with empty data and a degraded /health.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tweet_threat_analyzer::api::{create_router, AppState};
use tweet_threat_analyzer::batch::{BatchOptions, BatchProcessor};
use tweet_threat_analyzer::context::AnalysisContext;
use tweet_threat_analyzer::source::load_records_default;
use tweet_threat_analyzer::RecordAnalyzer;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Worker count for the startup batch; BATCH_WORKERS overrides.
fn batch_workers() -> usize {
    std::env::var("BATCH_WORKERS")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|w| *w >= 1)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Reference data must be fully materialized before any analysis.
    let ctx = Arc::new(AnalysisContext::load_default()?);
    let processor = Arc::new(BatchProcessor::with_options(
        RecordAnalyzer::new(ctx),
        BatchOptions {
            workers: batch_workers(),
        },
    ));

    // Record source is a collaborator: unavailable data degrades, not kills.
    let (raw, source_ok) = match load_records_default() {
        Ok(records) => (records, true),
        Err(e) => {
            error!(error = %e, "record source unavailable, serving empty data");
            (Vec::new(), false)
        }
    };

    let processed = processor.process(&raw);
    info!(
        raw = raw.len(),
        processed = processed.len(),
        "startup annotation complete"
    );

    let state = AppState {
        processor,
        raw: Arc::new(raw),
        processed: Arc::new(processed),
        source_ok,
    };
    let router = create_router(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router).await?;
    Ok(())
}

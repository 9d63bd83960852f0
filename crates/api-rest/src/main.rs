//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful during development when you want to point the server at a particular data directory
//! without the workspace's `er-run` binary (which also loads `.env`).

use api_rest::AppState;
use er_core::config::{flag_from_env_value, store_backend_from_env_value};
use er_core::{CoreConfig, TriageService};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the ER REST API server
///
/// # Environment Variables
/// - `ER_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATA_DIR`: File store root (default: "patient_data")
/// - `ER_STORE`: `memory` or `files` (default: `files`)
/// - `ER_SEED_SAMPLE_DATA`: seed an empty store with sample patients
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid or the store cannot be opened,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("er_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("ER_REST_ADDR").unwrap_or_else(|_| er_core::DEFAULT_REST_ADDR.into());
    let patient_data_dir = std::env::var("PATIENT_DATA_DIR")
        .unwrap_or_else(|_| er_core::DEFAULT_PATIENT_DATA_DIR.into());

    let cfg = CoreConfig::new(
        PathBuf::from(patient_data_dir),
        store_backend_from_env_value(std::env::var("ER_STORE").ok())?,
        flag_from_env_value(
            "ER_SEED_SAMPLE_DATA",
            std::env::var("ER_SEED_SAMPLE_DATA").ok(),
        )?,
    )?;

    let triage = TriageService::new(cfg.open_store()?);
    if cfg.seed_sample_data() {
        triage.seed_sample_data()?;
    }

    tracing::info!("-- Starting ER REST API on {}", addr);
    api_rest::serve(&addr, AppState::new(triage)).await
}

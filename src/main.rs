use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use er_core::config::{flag_from_env_value, store_backend_from_env_value};
use er_core::{CoreConfig, StoreBackend, TriageService};

/// Main entry point for the ER tracker
///
/// Loads `.env`, resolves configuration once, opens the patient store and serves the REST API.
///
/// # Environment Variables
/// - `ER_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATA_DIR`: Root of the file store (default: "patient_data")
/// - `ER_STORE`: `memory` or `files` (default: `files`)
/// - `ER_SEED_SAMPLE_DATA`: when true, seed an empty store with sample patients
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, store startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("er_run=info".parse()?)
                .add_directive("er_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("ER_REST_ADDR").unwrap_or_else(|_| er_core::DEFAULT_REST_ADDR.into());
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

    match cfg.store_backend() {
        StoreBackend::Memory => tracing::info!("++ Using in-memory patient store"),
        StoreBackend::Files => tracing::info!(
            "++ Using file patient store at {}",
            cfg.patient_data_dir().display()
        ),
    }

    let triage = TriageService::new(cfg.open_store()?);
    if cfg.seed_sample_data() {
        let seeded = triage.seed_sample_data()?;
        tracing::info!("++ Seeded {} sample patients", seeded);
    }

    tracing::info!("++ Starting ER REST on {}", rest_addr);
    api_rest::serve(&rest_addr, AppState::new(triage)).await
}

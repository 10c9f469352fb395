//! Rules Text Gate — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::path::PathBuf;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rules_text_gate::api::{self, AppState};
use rules_text_gate::config::{
    start_hot_reload_thread, GateConfig, GateHandle, DEFAULT_GATE_CONFIG_PATH,
    ENV_GATE_CONFIG_PATH,
};
use rules_text_gate::metrics::Metrics;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - GATE_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("GATE_DEV_LOG").ok().is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gate=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    // --- Initialize the text gate ---
    let cfg = GateConfig::from_toml().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default gate config");
        GateConfig::default()
    });

    let metrics = Metrics::init(cfg.min_score)?;

    let handle = GateHandle::new(cfg);

    // If hot reload is enabled, spawn background watcher
    let path = std::env::var(ENV_GATE_CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_GATE_CONFIG_PATH));
    start_hot_reload_thread(handle.clone(), path);

    let state = AppState { gate: handle };
    let router = api::create_router(state).merge(metrics.router());

    Ok(router.into())
}

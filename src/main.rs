//! AI Scanner Core - Main Entry Point

use std::time::Duration;

use ai_scanner_core::api::{self, CoreServices};
use ai_scanner_core::constants::{APP_NAME, APP_VERSION};
use ai_scanner_core::logic::config::ScannerConfig;

/// One-line status summary period
const STATUS_LOG_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    // .env is optional
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Cannot load .env: {}", e);
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let config = ScannerConfig::from_env();
    match serde_json::to_string(&config.summary()) {
        Ok(summary) => log::info!("Config: {}", summary),
        Err(e) => log::warn!("Cannot render config summary: {}", e),
    }

    let mut services = CoreServices::start(&config);

    let mut ticker = tokio::time::interval(STATUS_LOG_INTERVAL);
    // First tick completes immediately
    ticker.tick().await;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => log_status(&services),
            res = &mut shutdown => {
                if let Err(e) = res {
                    log::error!("Cannot listen for Ctrl-C: {}", e);
                }
                break;
            }
        }
    }

    services.shutdown();
    log::info!("{} stopped", APP_NAME);
}

fn log_status(services: &CoreServices) {
    let status = api::get_engine_status(services);
    log::info!(
        "Status {:?} | issues {} | files {} | blocked {} | AI {} (breaker open: {}, cached {}) | immunity {:?}",
        status.scanner.status,
        status.scanner.issues,
        status.scanner.files_last_sweep,
        status.scanner.blocked_artifacts,
        if status.ai.configured { "online" } else { "offline" },
        status.ai.breaker.open,
        status.ai.cached_verdicts,
        status.immunity,
    );
}

//! Commands - API cho HTTP layer
//!
//! Mỗi command là một read-only accessor hoặc một user-triggered action trên
//! `CoreServices`. Không command nào trigger scan hay block chờ scheduler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use super::engine_status::{AiStatus, EngineStatus, ScannerStatus};
use super::state::CoreServices;
use crate::constants::APP_VERSION;
use crate::logic::immunity::ImmunityStatus;
use crate::logic::scan_loop::ScanSnapshot;
use crate::logic::url_scan::UrlDecision;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Answer of a quarantine-by-name request
#[derive(Debug, Clone, Serialize)]
pub struct QuarantineResponse {
    pub status: String,
    pub msg: String,
}

// ============================================================================
// SCAN COMMANDS
// ============================================================================

/// Latest published snapshot; never blocks on a running sweep
pub fn get_scan_snapshot(services: &CoreServices) -> Arc<ScanSnapshot> {
    services.scheduler.latest()
}

/// Artifacts found dangerous since start
pub fn get_blocked_artifacts(services: &CoreServices) -> Vec<String> {
    services.scheduler.blocked_artifacts()
}

// ============================================================================
// QUARANTINE COMMANDS
// ============================================================================

/// Move `path` into the vault. `(true, vault path)` or `(false, reason)`.
pub fn quarantine_threat(services: &CoreServices, path: &Path, display_name: &str) -> (bool, String) {
    let display_name = final_component(display_name);
    match services.quarantine.quarantine(path, &display_name) {
        Ok(record) => (true, record.vault_path.display().to_string()),
        Err(e) => {
            log::error!("Quarantine failed: {}", e);
            (false, e.to_string())
        }
    }
}

/// Requested name under the scan root, else relative to the working directory
pub fn resolve_quarantine_target(scan_root: &Path, filename: &str) -> Option<PathBuf> {
    let under_root = scan_root.join(filename);
    if under_root.exists() {
        return Some(under_root);
    }

    let relative = Path::new(filename);
    let absolute = if relative.is_absolute() {
        relative.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(relative)
    };
    absolute.exists().then_some(absolute)
}

/// Resolve a filename and quarantine it
pub fn quarantine_by_name(services: &CoreServices, filename: &str) -> Result<QuarantineResponse, String> {
    let target = resolve_quarantine_target(services.target_dir(), filename)
        .ok_or_else(|| "File not found.".to_string())?;

    match quarantine_threat(services, &target, filename) {
        (true, vault_path) => Ok(QuarantineResponse {
            status: "success".to_string(),
            msg: format!("File secured in {}", vault_path),
        }),
        (false, reason) => Err(format!("Quarantine failed: {}", reason)),
    }
}

fn final_component(display_name: &str) -> String {
    Path::new(display_name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| display_name.to_string())
}

// ============================================================================
// IMMUNITY / URL / STATUS COMMANDS
// ============================================================================

pub fn get_immunity_status(services: &CoreServices) -> ImmunityStatus {
    services.immunity.status()
}

pub async fn scan_url(services: &CoreServices, url: &str) -> Result<UrlDecision, String> {
    let url = url.trim();
    if url.is_empty() {
        return Err("Missing url".to_string());
    }
    Ok(services.url_scanner.analyze(url).await)
}

pub fn get_engine_status(services: &CoreServices) -> EngineStatus {
    let snapshot = services.scheduler.latest();
    EngineStatus {
        version: APP_VERSION.to_string(),
        scanner: ScannerStatus {
            running: services.scheduler.is_running(),
            status: snapshot.status,
            issues: snapshot.issues.len(),
            files_last_sweep: snapshot.activity_log.len(),
            last_sweep: snapshot.completed_at.map(|t| t.to_rfc3339()),
            blocked_artifacts: services.scheduler.blocked_artifacts().len(),
        },
        ai: AiStatus {
            configured: services.ai_configured,
            breaker: services.breaker.status(),
            cached_verdicts: services.cache.len(),
        },
        immunity: services.immunity.status().status,
        config: services.summary.clone(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

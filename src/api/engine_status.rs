use serde::Serialize;

use crate::logic::ai_bridge::BreakerStatus;
use crate::logic::config::ConfigSummary;
use crate::logic::immunity::GuardState;
use crate::logic::scan_loop::ScanStatus;

#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub version: String,
    pub scanner: ScannerStatus,
    pub ai: AiStatus,
    pub immunity: GuardState,
    pub config: ConfigSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScannerStatus {
    pub running: bool,
    pub status: ScanStatus,
    pub issues: usize,
    pub files_last_sweep: usize,
    pub last_sweep: Option<String>,
    pub blocked_artifacts: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiStatus {
    /// false: every AI-layer verdict is the fail-open one
    pub configured: bool,
    pub breaker: BreakerStatus,
    pub cached_verdicts: usize,
}

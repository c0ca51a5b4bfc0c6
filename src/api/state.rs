//! Service wiring
//!
//! Builds the engines from a `ScannerConfig`, starts the two background
//! contexts (scan scheduler, immunity guard) and keeps the read handles the
//! commands need.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::logic::ai_bridge::{adapter_from_config, CircuitBreaker};
use crate::logic::cache::ResultCache;
use crate::logic::config::{ConfigSummary, ScannerConfig};
use crate::logic::features::FileFeatureExtractor;
use crate::logic::immunity::{ImmunityGuard, ImmunityHandle};
use crate::logic::pipeline::ClassificationPipeline;
use crate::logic::response::QuarantineManager;
use crate::logic::scan_loop::{ScanScheduler, SchedulerConfig, SchedulerHandle};
use crate::logic::url_scan::UrlScanner;

pub struct CoreServices {
    pub(crate) target_dir: PathBuf,
    pub(crate) summary: ConfigSummary,
    pub(crate) ai_configured: bool,
    pub(crate) breaker: Arc<CircuitBreaker>,
    pub(crate) cache: Arc<ResultCache>,
    pub(crate) scheduler: SchedulerHandle,
    pub(crate) immunity: ImmunityHandle,
    pub(crate) quarantine: QuarantineManager,
    pub(crate) url_scanner: UrlScanner,
}

impl CoreServices {
    /// Build every engine and start the background contexts.
    ///
    /// A guard that cannot start is kept as DISABLED; the scanner still runs.
    pub fn start(config: &ScannerConfig) -> Self {
        let breaker = Arc::new(CircuitBreaker::new(config.ai_cooldown));
        let cache = Arc::new(ResultCache::new());

        let pipeline = Arc::new(ClassificationPipeline::new(
            Arc::new(FileFeatureExtractor),
            adapter_from_config(config, breaker.clone()),
            cache.clone(),
        ));
        let ai_configured = pipeline.ai_configured();

        let scheduler = ScanScheduler::new(SchedulerConfig::from_config(config), pipeline).start();

        let guard = Arc::new(ImmunityGuard::from_config(config));
        let immunity = match ImmunityHandle::start(guard.clone()) {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("Immunity guard disabled: {}", e);
                ImmunityHandle::disabled(guard)
            }
        };

        Self {
            target_dir: config.target_dir.clone(),
            summary: config.summary(),
            ai_configured,
            url_scanner: UrlScanner::from_config(config, breaker.clone()),
            breaker,
            cache,
            scheduler,
            immunity,
            quarantine: QuarantineManager::new(config.vault_dir.clone()),
        }
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Stop both background contexts and wait for them
    pub fn shutdown(&mut self) {
        log::info!("Shutting down core services...");
        self.scheduler.stop();
        self.immunity.stop();
    }
}

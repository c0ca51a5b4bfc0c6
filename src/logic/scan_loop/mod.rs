//! Background Scan Scheduler
//!
//! Một thread riêng sweep target directory (chỉ direct children), chạy mỗi
//! entry qua Classification Pipeline, rồi publish snapshot mới một lần sau
//! khi listing kết thúc.
//!
//! ## Failure handling
//! - Lỗi per-entry (vanished file, permission): log debug, bỏ entry
//! - Lỗi cả sweep (root không list được): log error, retry sau `retry_delay`
//! - Scheduler không bao giờ tự dừng; chỉ `SchedulerHandle::stop()`

pub mod snapshot;

#[cfg(test)]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::constants::SELF_REFERENTIAL_NAMES;
use crate::logic::config::ScannerConfig;
use crate::logic::pipeline::{ClassificationPipeline, ScanError};
use crate::logic::response::BlockList;
use crate::logic::threat::ThreatRecord;

pub use snapshot::{ActivityRecord, ScanSnapshot, ScanStatus, SnapshotPublisher, SnapshotReader};

/// Granularity of interruptible sleeps
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub target_dir: PathBuf,
    pub vault_dir: PathBuf,
    /// File names never classified
    pub skip_names: Vec<String>,
    pub entry_delay: Duration,
    pub scan_interval: Duration,
    pub retry_delay: Duration,
}

impl SchedulerConfig {
    pub fn from_config(config: &ScannerConfig) -> Self {
        let mut skip_names: Vec<String> = SELF_REFERENTIAL_NAMES.iter().map(|s| s.to_string()).collect();
        // The immunity guard owns this one
        if let Some(name) = config.protected_file.file_name() {
            skip_names.push(name.to_string_lossy().to_string());
        }

        Self {
            target_dir: config.target_dir.clone(),
            vault_dir: config.vault_dir.clone(),
            skip_names,
            entry_delay: config.entry_delay,
            scan_interval: config.scan_interval,
            retry_delay: config.retry_delay,
        }
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

pub struct ScanScheduler {
    config: SchedulerConfig,
    pipeline: Arc<ClassificationPipeline>,
    publisher: SnapshotPublisher,
    blocked: BlockList,
}

impl ScanScheduler {
    pub fn new(config: SchedulerConfig, pipeline: Arc<ClassificationPipeline>) -> Self {
        Self {
            config,
            pipeline,
            publisher: SnapshotPublisher::new(),
            blocked: BlockList::new(),
        }
    }

    pub fn reader(&self) -> SnapshotReader {
        self.publisher.reader()
    }

    /// Names of artifacts found dangerous, across all sweeps
    pub fn blocked(&self) -> BlockList {
        self.blocked.clone()
    }

    /// One pass over the direct children of the target directory.
    ///
    /// Only a listing failure is an error; per-entry failures are omitted.
    pub fn sweep(&self) -> Result<ScanSnapshot, ScanError> {
        let root = &self.config.target_dir;
        let entries = fs::read_dir(root).map_err(|source| ScanError::Listing {
            path: root.clone(),
            source,
        })?;

        let mut issues = Vec::new();
        let mut activity = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable entry in {}: {}", root.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if self.should_skip(&path, &name) {
                continue;
            }

            // Tripped mid-sweep: the rest of this sweep is skipped, not delayed
            if let Some(remaining) = self.pipeline.breaker().remaining() {
                log::debug!("Breaker open ({}s left), skipping {}", remaining.as_secs(), name);
                continue;
            }

            let classification = match self.pipeline.classify_file(&path) {
                Ok(c) => c,
                Err(e) => {
                    log::debug!("Omitting {} from sweep: {}", name, e);
                    continue;
                }
            };

            let verdict = classification.verdict;
            let location = path.display().to_string();
            activity.push(ActivityRecord::new(&name, &location, &verdict));

            if verdict.dangerous {
                issues.push(ThreatRecord::security(&name, &location, &verdict));
                if self.blocked.block(&name) {
                    log::warn!("[{}] Threat detected: {} ({})", verdict.severity, name, verdict.source);
                }
            }

            if !self.config.entry_delay.is_zero() {
                thread::sleep(self.config.entry_delay);
            }
        }

        Ok(ScanSnapshot::from_sweep(issues, activity))
    }

    /// Sweep and publish; the only write point of the snapshot
    pub fn run_once(&self) -> Result<Arc<ScanSnapshot>, ScanError> {
        let snapshot = self.sweep()?;
        Ok(self.publisher.publish(snapshot))
    }

    /// Anything but a regular file (directories, FIFOs, sockets, devices,
    /// dangling links) is skipped; opening a FIFO blocks the sweep.
    fn should_skip(&self, path: &Path, name: &str) -> bool {
        !fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
            || path.starts_with(&self.config.vault_dir)
            || self.config.skip_names.iter().any(|n| n == name)
    }

    /// Move the scheduler onto its own thread
    pub fn start(self) -> SchedulerHandle {
        let running = Arc::new(AtomicBool::new(true));
        let reader = self.reader();
        let blocked = self.blocked();

        let flag = running.clone();
        let thread = thread::Builder::new()
            .name("scan-scheduler".to_string())
            .spawn(move || self.run(flag))
            .map_err(|e| log::error!("Cannot spawn scan scheduler: {}", e))
            .ok();

        if thread.is_none() {
            running.store(false, Ordering::SeqCst);
        }

        SchedulerHandle { reader, blocked, running, thread }
    }

    fn run(self, running: Arc<AtomicBool>) {
        log::info!("Background scanner started on {}", self.config.target_dir.display());
        let mut last_status = None;

        while running.load(Ordering::SeqCst) {
            let started = Instant::now();
            match self.run_once() {
                Ok(snapshot) => {
                    if last_status != Some(snapshot.status) {
                        log::info!(
                            "Scan status {:?}: {} issue(s), {} file(s)",
                            snapshot.status,
                            snapshot.issues.len(),
                            snapshot.activity_log.len()
                        );
                        last_status = Some(snapshot.status);
                    }
                    log::debug!("Sweep published in {}ms", started.elapsed().as_millis());
                    sleep_while_running(&running, self.config.scan_interval);
                }
                Err(e) => {
                    log::error!("Scanner worker error: {}", e);
                    sleep_while_running(&running, self.config.retry_delay);
                }
            }
        }

        log::info!("Background scanner stopped");
    }
}

fn sleep_while_running(running: &AtomicBool, total: Duration) {
    let deadline = Instant::now() + total;
    while running.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep(STOP_POLL_INTERVAL.min(deadline - now));
    }
}

// ============================================================================
// HANDLE
// ============================================================================

/// Control and read access to a running scheduler
pub struct SchedulerHandle {
    reader: SnapshotReader,
    blocked: BlockList,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    pub fn reader(&self) -> SnapshotReader {
        self.reader.clone()
    }

    pub fn latest(&self) -> Arc<ScanSnapshot> {
        self.reader.current()
    }

    pub fn blocked_artifacts(&self) -> Vec<String> {
        self.blocked.list()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop after the current sweep and wait for the thread
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Scan scheduler thread panicked");
            }
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

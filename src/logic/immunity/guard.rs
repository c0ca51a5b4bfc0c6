//! Integrity Guard
//!
//! Event-driven self-healing cho một protected file:
//! 1. notify watcher trên parent directory (non-recursive), lọc theo tên file
//! 2. Content khác baseline -> ISOLATION (placeholder identity) + block
//! 3. Ghi lại baseline (temp file + rename, reader không thấy nội dung dở dang)
//! 4. HEALING
//!
//! Identity chỉ là placeholder: một modify event không cho biết process nào
//! đã ghi file. Không có debounce: mỗi event quan sát được cho một cặp
//! ISOLATION + HEALING.

use std::collections::VecDeque;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use chrono::Utc;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::{Mutex, RwLock};

use super::types::{GuardState, ImmunityAction, ImmunityError, ImmunityStatus, IsolationLogEntry};
use crate::logic::config::ScannerConfig;
use crate::logic::response::BlockList;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Attributed responsible process
pub const PLACEHOLDER_IDENTITY: &str = "suspicious_app.exe";

/// Entries kept in memory; oldest dropped first
const LOG_RETENTION: usize = 500;

// ============================================================================
// LOG
// ============================================================================

/// Append-only isolation / healing log with capped retention
pub struct ImmunityLog {
    entries: RwLock<VecDeque<IsolationLogEntry>>,
    retention: usize,
}

impl ImmunityLog {
    pub fn new(retention: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            retention: retention.max(1),
        }
    }

    pub fn append(&self, action: ImmunityAction, message: String) {
        let mut entries = self.entries.write();
        if entries.len() == self.retention {
            entries.pop_front();
        }
        entries.push_back(IsolationLogEntry { time: Utc::now(), action, message });
    }

    /// Last `n` entries, oldest first
    pub fn recent(&self, n: usize) -> Vec<IsolationLogEntry> {
        let entries = self.entries.read();
        entries.iter().skip(entries.len().saturating_sub(n)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

// ============================================================================
// GUARD
// ============================================================================

pub struct ImmunityGuard {
    protected_file: PathBuf,
    baseline: Vec<u8>,
    blocked: BlockList,
    log: ImmunityLog,
    log_limit: usize,
    /// Serializes check-and-restore
    healing: Mutex<()>,
}

impl ImmunityGuard {
    pub fn new(protected_file: impl Into<PathBuf>, baseline: impl Into<Vec<u8>>, log_limit: usize) -> Self {
        Self {
            protected_file: protected_file.into(),
            baseline: baseline.into(),
            blocked: BlockList::new(),
            log: ImmunityLog::new(LOG_RETENTION),
            log_limit,
            healing: Mutex::new(()),
        }
    }

    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::new(
            config.protected_file.clone(),
            config.protected_content.clone(),
            config.immunity_log_limit,
        )
    }

    pub fn protected_file(&self) -> &Path {
        &self.protected_file
    }

    pub fn blocked(&self) -> &BlockList {
        &self.blocked
    }

    pub fn log(&self) -> &ImmunityLog {
        &self.log
    }

    /// Write the baseline if the protected file does not exist.
    /// Returns true when the file was created.
    pub fn ensure_protected_file(&self) -> Result<bool, ImmunityError> {
        if self.protected_file.exists() {
            return Ok(false);
        }
        fs::write(&self.protected_file, &self.baseline).map_err(|source| ImmunityError::Io {
            path: self.protected_file.clone(),
            source,
        })?;
        log::info!("Created protected file {}", self.protected_file.display());
        Ok(true)
    }

    /// React to one modification event. Returns true when the file was healed.
    pub fn handle_modification(&self) -> Result<bool, ImmunityError> {
        let _healing = self.healing.lock();

        let tampered = match fs::read(&self.protected_file) {
            Ok(content) => content != self.baseline,
            // Deleted counts as tampered
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(source) => {
                return Err(ImmunityError::Io { path: self.protected_file.clone(), source });
            }
        };

        if !tampered {
            return Ok(false);
        }

        log::warn!("DETECTED ATTACK: {} modified", self.protected_file.display());

        let message = format!("Network Access CUT for {}", PLACEHOLDER_IDENTITY);
        log::warn!("{}", message);
        self.log.append(ImmunityAction::Isolation, message);
        self.blocked.block(PLACEHOLDER_IDENTITY);

        self.restore()?;

        let message = "System Config RESTORED to safe State".to_string();
        log::info!("{}", message);
        self.log.append(ImmunityAction::Healing, message);
        Ok(true)
    }

    fn restore(&self) -> Result<(), ImmunityError> {
        let io_err = |source: std::io::Error| ImmunityError::Io { path: self.protected_file.clone(), source };

        let mut staging = self.protected_file.clone().into_os_string();
        staging.push(".restore");
        let staging = PathBuf::from(staging);

        fs::write(&staging, &self.baseline).map_err(io_err)?;
        fs::rename(&staging, &self.protected_file).map_err(io_err)
    }

    /// Whether a watcher event concerns the protected file
    fn concerns_protected_file(&self, event: &Event) -> bool {
        let relevant_kind = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_));
        let Some(name) = self.protected_file.file_name() else {
            return false;
        };
        relevant_kind && event.paths.iter().any(|p| p.file_name() == Some(name))
    }

    /// Directory registered with the watcher
    fn watch_dir(&self) -> Result<PathBuf, ImmunityError> {
        match self.protected_file.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
            Some(parent) => Ok(parent.to_path_buf()),
            None => Err(ImmunityError::NoParent(self.protected_file.clone())),
        }
    }

    pub fn status(&self, state: GuardState) -> ImmunityStatus {
        ImmunityStatus {
            status: state,
            protected_file: self
                .protected_file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            blocked_apps: self.blocked.list(),
            logs: self.log.recent(self.log_limit),
        }
    }
}

// ============================================================================
// HANDLE
// ============================================================================

/// Running (or disabled) guard. Dropping the watcher ends the event thread.
pub struct ImmunityHandle {
    guard: Arc<ImmunityGuard>,
    watcher: Option<RecommendedWatcher>,
    thread: Option<JoinHandle<()>>,
}

impl ImmunityHandle {
    /// Create the protected file if needed and start watching it
    pub fn start(guard: Arc<ImmunityGuard>) -> Result<Self, ImmunityError> {
        guard.ensure_protected_file()?;

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;
        watcher.watch(&guard.watch_dir()?, RecursiveMode::NonRecursive)?;

        let worker = guard.clone();
        let thread = thread::Builder::new()
            .name("immunity-guard".to_string())
            .spawn(move || {
                for res in rx {
                    match res {
                        Ok(event) if worker.concerns_protected_file(&event) => {
                            if let Err(e) = worker.handle_modification() {
                                log::error!("Immunity guard: {}", e);
                            }
                        }
                        Ok(_) => {}
                        Err(e) => log::error!("Immunity watcher error: {}", e),
                    }
                }
                log::info!("Immunity guard stopped");
            })
            .map_err(|source| ImmunityError::Io { path: guard.protected_file.clone(), source })?;

        log::info!("Immunity Guard is ACTIVE on {}", guard.protected_file.display());

        Ok(Self {
            guard,
            watcher: Some(watcher),
            thread: Some(thread),
        })
    }

    /// Handle for a guard that could not start; status reports DISABLED
    pub fn disabled(guard: Arc<ImmunityGuard>) -> Self {
        Self { guard, watcher: None, thread: None }
    }

    pub fn is_active(&self) -> bool {
        self.watcher.is_some()
    }

    pub fn guard(&self) -> &Arc<ImmunityGuard> {
        &self.guard
    }

    pub fn status(&self) -> ImmunityStatus {
        let state = if self.is_active() { GuardState::Active } else { GuardState::Disabled };
        self.guard.status(state)
    }

    pub fn stop(&mut self) {
        // Drops the event sender, which ends the receive loop
        self.watcher.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Immunity guard thread panicked");
            }
        }
    }
}

impl Drop for ImmunityHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

//! Scan Snapshot
//!
//! Latest fully-formed sweep result. Immutable after construction; publication
//! swaps an `Arc` under one write point so readers see either the old or the
//! new snapshot, never a mix.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use crate::logic::threat::{Severity, ThreatRecord, Verdict};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanStatus {
    Secure,
    Critical,
}

/// One scanned file of one sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    pub file: String,
    pub location: String,
    pub status: Severity,
    #[serde(rename = "model")]
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub reason: String,
    pub confidence: u8,
}

impl ActivityRecord {
    pub fn new(file: &str, location: &str, verdict: &Verdict) -> Self {
        Self {
            file: file.to_string(),
            location: location.to_string(),
            status: verdict.severity,
            source: verdict.source.clone(),
            timestamp: Utc::now(),
            reason: verdict.reason.clone(),
            confidence: verdict.confidence,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanSnapshot {
    /// None until the first sweep completes
    pub sweep_id: Option<Uuid>,
    pub status: ScanStatus,
    pub issues: Vec<ThreatRecord>,
    pub activity_log: Vec<ActivityRecord>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ScanSnapshot {
    /// Placeholder served before the first sweep
    pub fn initial() -> Self {
        Self {
            sweep_id: None,
            status: ScanStatus::Secure,
            issues: Vec::new(),
            activity_log: Vec::new(),
            completed_at: None,
        }
    }

    /// Snapshot of one finished sweep; Critical iff it found any issue
    pub fn from_sweep(issues: Vec<ThreatRecord>, activity_log: Vec<ActivityRecord>) -> Self {
        let status = if issues.is_empty() { ScanStatus::Secure } else { ScanStatus::Critical };
        Self {
            sweep_id: Some(Uuid::new_v4()),
            status,
            issues,
            activity_log,
            completed_at: Some(Utc::now()),
        }
    }
}

// ============================================================================
// PUBLICATION
// ============================================================================

/// Write side, owned by the scheduler
pub struct SnapshotPublisher {
    current: Arc<RwLock<Arc<ScanSnapshot>>>,
}

/// Read side handed to the API layer
#[derive(Clone)]
pub struct SnapshotReader {
    current: Arc<RwLock<Arc<ScanSnapshot>>>,
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(ScanSnapshot::initial()))),
        }
    }

    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader { current: self.current.clone() }
    }

    /// Replace the published snapshot wholesale
    pub fn publish(&self, snapshot: ScanSnapshot) -> Arc<ScanSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write() = snapshot.clone();
        snapshot
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotReader {
    /// Current snapshot; the lock is held only for the pointer copy
    pub fn current(&self) -> Arc<ScanSnapshot> {
        self.current.read().clone()
    }
}

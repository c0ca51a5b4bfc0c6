//! Immunity Types

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImmunityAction {
    Isolation,
    Healing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsolationLogEntry {
    pub time: DateTime<Utc>,
    pub action: ImmunityAction,
    #[serde(rename = "msg")]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GuardState {
    Active,
    Disabled,
}

/// Immunity status served to the API layer
#[derive(Debug, Clone, Serialize)]
pub struct ImmunityStatus {
    pub status: GuardState,
    pub protected_file: String,
    pub blocked_apps: Vec<String>,
    /// Most recent entries, oldest first
    pub logs: Vec<IsolationLogEntry>,
}

#[derive(Debug, Error)]
pub enum ImmunityError {
    #[error("Watcher error: {0}")]
    Watcher(#[from] notify::Error),

    #[error("Protected file I/O on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Protected file has no parent directory: {}", .0.display())]
    NoParent(PathBuf),
}

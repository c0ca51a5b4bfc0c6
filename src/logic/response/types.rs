//! Response Types

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Failure of a user-triggered response action; always surfaced to the caller
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Not a regular file: {}", .path.display())]
    NotAFile { path: PathBuf },

    /// Vault entry with the same name already exists (same name, same second)
    #[error("Vault entry already exists: {}", .path.display())]
    Collision { path: PathBuf },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl ActionError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        ActionError::Io { context: context.into(), source }
    }
}

// ============================================================================
// QUARANTINE TYPES
// ============================================================================

/// Result of one successful quarantine. Not persisted: the vault entry's
/// file name is the only record.
#[derive(Debug, Clone, Serialize)]
pub struct QuarantineRecord {
    pub original_path: PathBuf,
    pub vault_path: PathBuf,
    pub moved_at: DateTime<Utc>,
}

//! File Quarantine Module
//!
//! Mục đích: Di chuyển file nghi ngờ vào quarantine vault
//!
//! - Vault tạo lazily ở lần quarantine đầu tiên
//! - Tên entry: `<name>.quarantined_<unix-timestamp>`
//! - Không có manifest: tên file là record duy nhất

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::types::{ActionError, QuarantineRecord};

// ============================================================================
// QUARANTINE MANAGER
// ============================================================================

#[derive(Debug, Clone)]
pub struct QuarantineManager {
    vault_dir: PathBuf,
}

impl QuarantineManager {
    pub fn new(vault_dir: impl Into<PathBuf>) -> Self {
        Self { vault_dir: vault_dir.into() }
    }

    pub fn vault_dir(&self) -> &Path {
        &self.vault_dir
    }

    /// Move `path` into the vault under `display_name`.
    ///
    /// Does not judge the file; the caller already decided it is dangerous.
    pub fn quarantine(&self, path: &Path, display_name: &str) -> Result<QuarantineRecord, ActionError> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(ActionError::NotAFile { path: path.to_path_buf() }),
            Err(_) => return Err(ActionError::FileNotFound { path: path.to_path_buf() }),
        }

        fs::create_dir_all(&self.vault_dir)
            .map_err(|e| ActionError::io(format!("Cannot create vault {}", self.vault_dir.display()), e))?;

        let moved_at = Utc::now();
        let vault_path = self.vault_dir.join(vault_entry_name(display_name, moved_at.timestamp()));

        // rename() would silently replace an existing entry
        if vault_path.exists() {
            return Err(ActionError::Collision { path: vault_path });
        }

        move_file(path, &vault_path)?;

        log::warn!("QUARANTINED: {} -> {}", display_name, vault_path.display());

        Ok(QuarantineRecord {
            original_path: path.to_path_buf(),
            vault_path,
            moved_at,
        })
    }
}

/// `<name>.quarantined_<timestamp>`
pub fn vault_entry_name(display_name: &str, timestamp: i64) -> String {
    format!("{}.quarantined_{}", display_name, timestamp)
}

/// Rename, falling back to copy + remove across devices
fn move_file(from: &Path, to: &Path) -> Result<(), ActionError> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    fs::copy(from, to)
        .map_err(|e| ActionError::io(format!("Failed to quarantine {}", from.display()), e))?;

    if let Err(e) = fs::remove_file(from) {
        // Do not leave two copies behind
        let _ = fs::remove_file(to);
        return Err(ActionError::io(format!("Failed to remove {}", from.display()), e));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Runtime overrides are read from the environment by `logic::config`.

use std::time::Duration;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "AI Scanner";

// ============================================
// Scheduler
// ============================================

/// Sleep between two sweeps (seconds)
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 5;

/// Delay after a failed sweep before retrying (seconds)
pub const DEFAULT_SCAN_RETRY_DELAY_SECS: u64 = 5;

/// Delay between two entries of one sweep, bounds CPU usage (milliseconds)
pub const DEFAULT_SCAN_ENTRY_DELAY_MS: u64 = 100;

/// Names the scheduler never classifies (its own files and VCS/runtime dirs)
pub const SELF_REFERENTIAL_NAMES: &[&str] = &[
    "ai-scanner-core",
    "ai-scanner-core.exe",
    ".env",
    "mos.db",
    "__pycache__",
    ".git",
];

// ============================================
// AI classifiers
// ============================================

/// Circuit breaker cooldown after a rate-limit answer (seconds)
pub const DEFAULT_AI_COOLDOWN_SECS: u64 = 60;

/// Timeout of one remote file classification (seconds)
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 20;

/// Deadline of one URL judgment (seconds)
pub const DEFAULT_URL_AI_TIMEOUT_SECS: u64 = 3;

pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_URL_MODEL: &str = "gemini-1.5-flash";

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// ============================================
// Quarantine & immunity
// ============================================

/// Vault directory name, relative to the working directory
pub const DEFAULT_QUARANTINE_VAULT: &str = "QUARANTINE_VAULT";

/// Protected configuration file, relative to the working directory
pub const DEFAULT_PROTECTED_FILE: &str = "vital_system_config.txt";

/// Known-good content of the protected file
pub const DEFAULT_PROTECTED_CONTENT: &str = "ALLOW_TASK_MANAGER=TRUE\nFIREWALL=ON\nNO_VIRUS=TRUE";

/// Log entries returned by the immunity status
pub const DEFAULT_IMMUNITY_LOG_LIMIT: usize = 10;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Read a string variable, treating empty values as unset
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read a numeric variable or use the default
pub fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a duration given in seconds
pub fn env_secs(key: &str, default: u64) -> Duration {
    Duration::from_secs(env_u64(key, default))
}

/// Read a duration given in milliseconds
pub fn env_millis(key: &str, default: u64) -> Duration {
    Duration::from_millis(env_u64(key, default))
}

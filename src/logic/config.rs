//! Runtime configuration
//!
//! Defaults come from `constants`, overrides from the environment.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::constants::{self, env_millis, env_secs, env_string, env_u64};

/// Credentials and model of one remote classifier
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub api_key: String,
    pub model: String,
}

/// Full service configuration
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Directory swept by the scheduler (direct children only)
    pub target_dir: PathBuf,
    /// Quarantine vault
    pub vault_dir: PathBuf,
    /// File protected by the immunity guard
    pub protected_file: PathBuf,
    /// Known-good content of the protected file
    pub protected_content: Vec<u8>,

    /// Primary file classifier (Groq)
    pub groq: Option<ClassifierConfig>,
    /// Backup file classifier (Gemini)
    pub gemini: Option<ClassifierConfig>,
    /// Model used for URL judgments (shares the Gemini key)
    pub gemini_url_model: String,

    pub ai_timeout: Duration,
    pub url_ai_timeout: Duration,
    pub ai_cooldown: Duration,

    pub scan_interval: Duration,
    pub entry_delay: Duration,
    pub retry_delay: Duration,

    pub immunity_log_limit: usize,
}

impl ScannerConfig {
    /// Build the configuration from the environment
    pub fn from_env() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let target_dir = env_string("SCAN_TARGET_DIR")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| cwd.clone());

        let vault_dir = env_string("QUARANTINE_VAULT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| cwd.join(constants::DEFAULT_QUARANTINE_VAULT));

        let protected_file = env_string("PROTECTED_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| cwd.join(constants::DEFAULT_PROTECTED_FILE));

        let groq = env_string("GROQ_API_KEY").map(|api_key| ClassifierConfig {
            api_key,
            model: env_string("GROQ_MODEL")
                .unwrap_or_else(|| constants::DEFAULT_GROQ_MODEL.to_string()),
        });

        let gemini = env_string("GEMINI_API_KEY").map(|api_key| ClassifierConfig {
            api_key,
            model: env_string("GEMINI_MODEL")
                .unwrap_or_else(|| constants::DEFAULT_GEMINI_MODEL.to_string()),
        });

        Self {
            target_dir,
            vault_dir,
            protected_file,
            protected_content: constants::DEFAULT_PROTECTED_CONTENT.as_bytes().to_vec(),
            groq,
            gemini,
            gemini_url_model: env_string("GEMINI_URL_MODEL")
                .unwrap_or_else(|| constants::DEFAULT_GEMINI_URL_MODEL.to_string()),
            ai_timeout: env_secs("AI_TIMEOUT_SECS", constants::DEFAULT_AI_TIMEOUT_SECS),
            url_ai_timeout: env_secs("URL_AI_TIMEOUT_SECS", constants::DEFAULT_URL_AI_TIMEOUT_SECS),
            ai_cooldown: env_secs("AI_COOLDOWN_SECS", constants::DEFAULT_AI_COOLDOWN_SECS),
            scan_interval: env_secs("SCAN_INTERVAL_SECS", constants::DEFAULT_SCAN_INTERVAL_SECS),
            entry_delay: env_millis("SCAN_ENTRY_DELAY_MS", constants::DEFAULT_SCAN_ENTRY_DELAY_MS),
            retry_delay: env_secs("SCAN_RETRY_DELAY_SECS", constants::DEFAULT_SCAN_RETRY_DELAY_SECS),
            immunity_log_limit: env_u64(
                "IMMUNITY_LOG_LIMIT",
                constants::DEFAULT_IMMUNITY_LOG_LIMIT as u64,
            ) as usize,
        }
    }

    /// Summary safe to log (no secrets)
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            target_dir: self.target_dir.display().to_string(),
            vault_dir: self.vault_dir.display().to_string(),
            protected_file: self.protected_file.display().to_string(),
            primary_classifier: self.groq.as_ref().map(|c| c.model.clone()),
            backup_classifier: self.gemini.as_ref().map(|c| c.model.clone()),
            scan_interval_secs: self.scan_interval.as_secs(),
            ai_cooldown_secs: self.ai_cooldown.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub target_dir: String,
    pub vault_dir: String,
    pub protected_file: String,
    pub primary_classifier: Option<String>,
    pub backup_classifier: Option<String>,
    pub scan_interval_secs: u64,
    pub ai_cooldown_secs: u64,
}

//! AI Bridge - Remote classifier integration
//!
//! Gửi snippet tới remote AI classifiers, nhận structured judgment.
//!
//! ## Structure
//! - `types.rs` - AiJudgment, AiOutcome, ClassifierError
//! - `breaker.rs` - Circuit breaker (rate-limit cooldown)
//! - `prompt.rs` - Prompt building + lenient JSON parsing
//! - `remote.rs` - RemoteClassifier trait, Groq (primary) / Gemini (backup)
//! - `adapter.rs` - Primary/backup orchestration

pub mod types;
pub mod breaker;
pub mod prompt;
pub mod remote;
pub mod adapter;

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

pub use types::{AiJudgment, AiOutcome, ClassifierError};
pub use breaker::{BreakerStatus, CircuitBreaker};
pub use prompt::{build_prompt, parse_judgment, AnalysisMode};
pub use remote::{GeminiClassifier, GroqClassifier, RemoteClassifier};
pub use adapter::AiClassifierAdapter;

use crate::logic::config::ScannerConfig;

/// Build the adapter from configuration; classifiers without a key are absent
pub fn adapter_from_config(config: &ScannerConfig, breaker: Arc<CircuitBreaker>) -> AiClassifierAdapter {
    let primary = config.groq.as_ref().map(|c| {
        Arc::new(GroqClassifier::new(&c.api_key, &c.model, config.ai_timeout)) as Arc<dyn RemoteClassifier>
    });
    let backup = config.gemini.as_ref().map(|c| {
        Arc::new(GeminiClassifier::new(&c.api_key, &c.model, config.ai_timeout)) as Arc<dyn RemoteClassifier>
    });

    if primary.is_none() && backup.is_none() {
        log::warn!("No AI classifier configured - AI layer runs fail-open (Offline)");
    }

    AiClassifierAdapter::new(primary, backup, breaker)
}

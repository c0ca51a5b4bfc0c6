//! AI Classifier Adapter
//!
//! Một interface cho primary + backup classifier, tôn trọng circuit breaker.
//!
//! Order: breaker check -> primary -> backup -> Unavailable.
//! Only a rate-limit answer from the primary trips the breaker; every other
//! failure falls through silently.

use std::sync::Arc;

use super::breaker::CircuitBreaker;
use super::remote::RemoteClassifier;
use super::types::AiOutcome;

pub struct AiClassifierAdapter {
    primary: Option<Arc<dyn RemoteClassifier>>,
    backup: Option<Arc<dyn RemoteClassifier>>,
    breaker: Arc<CircuitBreaker>,
}

impl AiClassifierAdapter {
    pub fn new(
        primary: Option<Arc<dyn RemoteClassifier>>,
        backup: Option<Arc<dyn RemoteClassifier>>,
        breaker: Arc<CircuitBreaker>,
    ) -> Self {
        Self { primary, backup, breaker }
    }

    /// Adapter with no remote classifier; every call is Unavailable
    pub fn offline(breaker: Arc<CircuitBreaker>) -> Self {
        Self::new(None, None, breaker)
    }

    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    pub fn has_classifiers(&self) -> bool {
        self.primary.is_some() || self.backup.is_some()
    }

    /// Obtain one judgment for `prompt`
    pub fn classify(&self, prompt: &str) -> AiOutcome {
        if let Some(remaining) = self.breaker.remaining() {
            log::debug!("AI cooldown active ({}s left), skipping remote classifiers", remaining.as_secs());
            return AiOutcome::Unavailable;
        }

        if let Some(primary) = &self.primary {
            match primary.classify(prompt) {
                Ok(judgment) => {
                    return AiOutcome::Judged { judgment, source: primary.name().to_string() };
                }
                Err(e) if e.is_rate_limit() => {
                    log::warn!("{} rate limited, trying backup", primary.name());
                    self.breaker.trip();
                }
                Err(e) => {
                    log::debug!("{} failed: {}", primary.name(), e);
                }
            }
        }

        if let Some(backup) = &self.backup {
            match backup.classify(prompt) {
                Ok(judgment) => {
                    return AiOutcome::Judged { judgment, source: backup.name().to_string() };
                }
                Err(e) => {
                    log::debug!("{} failed: {}", backup.name(), e);
                }
            }
        }

        AiOutcome::Unavailable
    }
}

//! AI Bridge Types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::threat::Verdict;

// ============================================================================
// JUDGMENT
// ============================================================================

/// Structured answer of a remote classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiJudgment {
    pub is_malware: bool,
    /// 0 - 100
    pub confidence: u8,
    pub reason: String,
}

/// Result of one adapter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiOutcome {
    /// A classifier answered; `source` names it
    Judged { judgment: AiJudgment, source: String },
    /// Breaker open or every classifier failed
    Unavailable,
}

impl AiOutcome {
    /// Map to a verdict. Unavailable becomes the fail-open SAFE verdict.
    pub fn into_verdict(self) -> Verdict {
        match self {
            AiOutcome::Judged { judgment, source } => {
                Verdict::judged(judgment.is_malware, judgment.confidence, judgment.reason, source)
            }
            AiOutcome::Unavailable => Verdict::unavailable(),
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Failure of one remote classification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// HTTP 429 or quota exhaustion
    #[error("Rate limited")]
    RateLimited,
    #[error("Request timed out")]
    Timeout,
    #[error("Unexpected HTTP status {0}")]
    Http(u16),
    #[error("Network error: {0}")]
    Network(String),
    /// Answer did not contain the expected JSON judgment
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ClassifierError {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, ClassifierError::RateLimited)
    }
}

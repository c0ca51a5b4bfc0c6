//! Threat Types
//!
//! Core types cho verdict classification.
//! KHÔNG chứa logic pipeline - chỉ data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY
// ============================================================================

/// Ordinal danger bucket of a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Safe,
    Low,
    Medium,
    High,
}

impl Severity {
    /// Severity of a dangerous judgment.
    ///
    /// `>= 85` HIGH, `>= 50` MEDIUM, otherwise LOW.
    pub fn from_confidence(confidence: u8) -> Self {
        if confidence >= 85 {
            Severity::High
        } else if confidence >= 50 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// SAFE whenever the artifact is not dangerous
    pub fn for_judgment(dangerous: bool, confidence: u8) -> Self {
        if dangerous {
            Self::from_confidence(confidence)
        } else {
            Severity::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Safe => "SAFE",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// VERDICT
// ============================================================================

/// Source names of the local layers
pub const SOURCE_SIGNATURE: &str = "Signature Engine";
pub const SOURCE_PREFILTER: &str = "Pre-Filter";
pub const SOURCE_OFFLINE: &str = "Offline";

/// Outcome of classifying one artifact. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub dangerous: bool,
    pub severity: Severity,
    /// 0 - 100
    pub confidence: u8,
    pub reason: String,
    /// Layer or classifier that produced the verdict
    pub source: String,
}

impl Verdict {
    /// Verdict of a remote judgment; severity derived from confidence
    pub fn judged(dangerous: bool, confidence: u8, reason: impl Into<String>, source: impl Into<String>) -> Self {
        let confidence = confidence.min(100);
        Self {
            dangerous,
            severity: Severity::for_judgment(dangerous, confidence),
            confidence,
            reason: reason.into(),
            source: source.into(),
        }
    }

    /// Signature hit: always HIGH / 100
    pub fn signature_hit(token: &str) -> Self {
        Self {
            dangerous: true,
            severity: Severity::High,
            confidence: 100,
            reason: format!("CRITICAL: Found dangerous signature '{}'", token),
            source: SOURCE_SIGNATURE.to_string(),
        }
    }

    /// Benign-document marker hit; a cost-control skip, not a judgment
    pub fn prefiltered() -> Self {
        Self {
            dangerous: false,
            severity: Severity::Safe,
            confidence: 0,
            reason: "Safe document text".to_string(),
            source: SOURCE_PREFILTER.to_string(),
        }
    }

    /// Fail-open verdict used when no classifier produced a judgment.
    ///
    /// Absence of evidence is treated as SAFE. An attacker able to force
    /// classifier unavailability (quota exhaustion) bypasses the AI layer.
    pub fn unavailable() -> Self {
        Self {
            dangerous: false,
            severity: Severity::Safe,
            confidence: 0,
            reason: "AI Unavailable/Skipped".to_string(),
            source: SOURCE_OFFLINE.to_string(),
        }
    }

    pub fn is_fail_open(&self) -> bool {
        self.source == SOURCE_OFFLINE
    }
}

// ============================================================================
// THREAT RECORD
// ============================================================================

/// Issue published in a snapshot; exists only for dangerous verdicts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "msg")]
    pub message: String,
    pub location: String,
}

impl ThreatRecord {
    pub fn security(name: &str, location: &str, verdict: &Verdict) -> Self {
        Self {
            kind: "security".to_string(),
            message: format!("[{}] THREAT: {}\nREASON: {}", verdict.severity, name, verdict.reason),
            location: location.to_string(),
        }
    }
}

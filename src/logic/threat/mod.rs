//! Threat Module
//!
//! Local layers của classification pipeline và verdict types.
//!
//! ## Structure
//! - `types`: Verdict, Severity, ThreatRecord
//! - `signature`: Signature Matcher (malicious tokens, short-circuits everything)
//! - `prefilter`: Content Prefilter (benign markers, skips the AI layer)

pub mod types;
pub mod signature;
pub mod prefilter;

pub use types::{
    Severity,
    Verdict,
    ThreatRecord,
    SOURCE_SIGNATURE,
    SOURCE_PREFILTER,
    SOURCE_OFFLINE,
};

pub use signature::{match_signatures, MALICIOUS_SIGNATURES};
pub use prefilter::{prefilter, BENIGN_MARKERS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(Severity::for_judgment(true, 84), Severity::Medium);
        assert_eq!(Severity::for_judgment(true, 85), Severity::High);
        assert_eq!(Severity::for_judgment(true, 49), Severity::Low);
        assert_eq!(Severity::for_judgment(true, 50), Severity::Medium);
        assert_eq!(Severity::for_judgment(false, 99), Severity::Safe);
    }

    #[test]
    fn test_judged_clamps_confidence() {
        let verdict = Verdict::judged(true, 250, "x", "test");
        assert_eq!(verdict.confidence, 100);
        assert_eq!(verdict.severity, Severity::High);
    }

    #[test]
    fn test_threat_record_message() {
        let verdict = Verdict::judged(true, 60, "packed dropper", "Groq Llama 3");
        let record = ThreatRecord::security("evil.exe", "/home/u/evil.exe", &verdict);
        assert_eq!(record.kind, "security");
        assert_eq!(record.message, "[MEDIUM] THREAT: evil.exe\nREASON: packed dropper");
    }

    #[test]
    fn test_severity_serializes_uppercase() {
        let json = serde_json::to_string(&Severity::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");
    }
}

//! Signature Matcher - precision-first local layer
//!
//! Substring match của extracted content với danh sách token độc hại.
//! First match wins. Đây là layer duy nhất được phép short-circuit toàn bộ pipeline.

use super::types::Verdict;

/// High-confidence malicious tokens (lower-case)
pub const MALICIOUS_SIGNATURES: &[&str] = &[
    "delete_system32",
    "starting encryption",
    "ransomware",
    "payload",
    "trojan",
    "xmrig",
    "bitcoin miner",
    "cmd.exe /c",
    "powershell -enc",
];

/// First signature token contained in `content_lower`
pub fn find_signature(content_lower: &str) -> Option<&'static str> {
    MALICIOUS_SIGNATURES
        .iter()
        .copied()
        .find(|sig| content_lower.contains(sig))
}

/// Match content against the signature list.
///
/// `content_lower` must already be lower-cased.
pub fn match_signatures(content_lower: &str) -> Option<Verdict> {
    find_signature(content_lower).map(Verdict::signature_hit)
}

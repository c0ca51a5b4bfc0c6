//! Content Prefilter
//!
//! Benign document markers that skip the AI layer. Cost control only: it runs
//! after the signature layer, so it can never hide a signature hit.

use super::types::Verdict;

/// Markers of plain document text (lower-case)
pub const BENIGN_MARKERS: &[&str] = &["nama:", "laporan", "skripsi"];

pub fn is_benign_document(content_lower: &str) -> bool {
    BENIGN_MARKERS.iter().any(|m| content_lower.contains(m))
}

/// SAFE verdict when a benign marker is present
pub fn prefilter(content_lower: &str) -> Option<Verdict> {
    is_benign_document(content_lower).then(Verdict::prefiltered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::threat::types::SOURCE_PREFILTER;

    #[test]
    fn test_document_marker() {
        let verdict = prefilter("nama: budi\nnim: 123").unwrap();
        assert!(!verdict.dangerous);
        assert_eq!(verdict.source, SOURCE_PREFILTER);
    }

    #[test]
    fn test_no_marker() {
        assert!(prefilter("#!/bin/sh\nls -la").is_none());
    }
}

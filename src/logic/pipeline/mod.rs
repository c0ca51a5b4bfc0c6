//! Classification Pipeline
//!
//! Orchestrates one artifact through the layers, strictly in order:
//!
//! 1. Result Cache (content hash)
//! 2. Signature Matcher - short-circuits everything
//! 3. Content Prefilter - skips the AI layer
//! 4. AI Classifier Adapter - fail-open when unavailable
//!
//! Every produced verdict is written to the cache before it is returned.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::logic::ai_bridge::{build_prompt, AiClassifierAdapter, AnalysisMode, CircuitBreaker};
use crate::logic::cache::{content_hash, ResultCache};
use crate::logic::features::extractor::is_sentinel;
use crate::logic::features::FeatureExtractor;
use crate::logic::threat::{match_signatures, prefilter, Verdict};


/// Listings shorter than this are not worth sending as ASSEMBLY
const MIN_LISTING_CHARS: usize = 20;

// ============================================================================
// ERRORS
// ============================================================================

/// Per-artifact or listing failure; recovered by the scheduler
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot list {path}: {source}")]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Verdict plus where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub from_cache: bool,
}

pub struct ClassificationPipeline {
    extractor: Arc<dyn FeatureExtractor>,
    adapter: AiClassifierAdapter,
    cache: Arc<ResultCache>,
}

impl ClassificationPipeline {
    pub fn new(
        extractor: Arc<dyn FeatureExtractor>,
        adapter: AiClassifierAdapter,
        cache: Arc<ResultCache>,
    ) -> Self {
        Self { extractor, adapter, cache }
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        self.adapter.breaker()
    }

    /// False when every AI-layer verdict will be the fail-open one
    pub fn ai_configured(&self) -> bool {
        self.adapter.has_classifiers()
    }

    /// Classify one file
    pub fn classify_file(&self, path: &Path) -> Result<Classification, ScanError> {
        let hash = content_hash(path).map_err(|source| ScanError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(verdict) = self.cache.get(&hash) {
            log::debug!("Cache hit for {} ({})", path.display(), &hash[..12]);
            return Ok(Classification { verdict, from_cache: true });
        }

        let verdict = self.run_layers(path);
        Ok(Classification {
            verdict: self.cache.insert(&hash, verdict),
            from_cache: false,
        })
    }

    /// Signature -> Prefilter -> AI, without the cache
    fn run_layers(&self, path: &Path) -> Verdict {
        let content = self.extractor.extract_strings(path);
        let lowered = content.to_lowercase();

        if let Some(verdict) = match_signatures(&lowered) {
            log::warn!("Signature hit in {}: {}", path.display(), verdict.reason);
            return verdict;
        }

        if let Some(verdict) = prefilter(&lowered) {
            return verdict;
        }

        let (mode, data) = if is_executable(path) {
            let listing = self.extractor.extract_assembly(path);
            if !is_sentinel(&listing) && listing.len() > MIN_LISTING_CHARS {
                (AnalysisMode::Assembly, listing)
            } else {
                (AnalysisMode::Text, content)
            }
        } else {
            (AnalysisMode::Text, content)
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let prompt = build_prompt(&file_name, mode, &data);
        self.adapter.classify(&prompt).into_verdict()
    }
}

fn is_executable(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("exe"))
        .unwrap_or(false)
}

//! URL Scan - Phishing decision for a single URL
//!
//! ## Structure
//! - `features.rs` - Lexical features
//! - `rules.rs` - Rule-based score + reasons
//! - `ai.rs` - Gemini one-word judgment (deadline, shared breaker)
//! - `fusion.rs` - Weighted decision

pub mod features;
pub mod rules;
pub mod ai;
pub mod fusion;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use features::{extract_url_features, UrlFeatures};
pub use rules::{rule_based_scan, RuleReport};
pub use ai::{GeminiUrlClassifier, UrlAi, UrlAiResult, UrlClassifier, UrlLabel};
pub use fusion::{fuse, UrlDecision, UrlEngineInfo, UrlStatus};

use crate::logic::ai_bridge::CircuitBreaker;
use crate::logic::config::ScannerConfig;

pub struct UrlScanner {
    ai: UrlAi,
}

impl UrlScanner {
    pub fn new(ai: UrlAi) -> Self {
        Self { ai }
    }

    /// URL judgments share the Gemini key and the file classifiers' breaker
    pub fn from_config(config: &ScannerConfig, breaker: Arc<CircuitBreaker>) -> Self {
        let classifier = config.gemini.as_ref().map(|c| {
            Arc::new(GeminiUrlClassifier::new(&c.api_key, &config.gemini_url_model)) as Arc<dyn UrlClassifier>
        });
        Self::new(UrlAi::new(classifier, breaker, config.url_ai_timeout))
    }

    pub async fn analyze(&self, url: &str) -> UrlDecision {
        log::info!("Scan requested for URL: {}", url);
        let rules = rule_based_scan(url);
        let ai = self.ai.assess(url).await;
        let decision = fuse(url, rules, &ai);

        if decision.status == UrlStatus::Phishing {
            log::warn!("Phishing URL: {} (risk {})", url, decision.risk_score);
        }
        decision
    }
}

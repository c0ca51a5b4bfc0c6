//! URL AI judgment
//!
//! One-word SAFE / PHISHING answer from Gemini under a hard deadline. Never
//! fails: every failure maps to an `unknown` result with a reason.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use crate::constants::GEMINI_API_BASE;
use crate::logic::ai_bridge::remote::gemini_text;
use crate::logic::ai_bridge::{CircuitBreaker, ClassifierError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlLabel {
    Safe,
    Phishing,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlAiResult {
    pub label: UrlLabel,
    /// 0.0 - 1.0
    pub confidence: f64,
    pub reasons: Vec<String>,
}

impl UrlAiResult {
    fn new(label: UrlLabel, confidence: f64, reason: impl Into<String>) -> Self {
        Self { label, confidence, reasons: vec![reason.into()] }
    }

    pub fn judged(label: UrlLabel) -> Self {
        match label {
            UrlLabel::Phishing => Self::new(label, 0.9, "AI detected phishing intent"),
            UrlLabel::Safe => Self::new(label, 0.9, "AI found no phishing pattern"),
            UrlLabel::Unknown => Self::unavailable(),
        }
    }

    pub fn failed(error: &ClassifierError) -> Self {
        Self::new(UrlLabel::Unknown, 0.4, format!("AI error: {}", error))
    }

    pub fn timed_out() -> Self {
        Self::new(UrlLabel::Unknown, 0.5, "AI scan timeout")
    }

    pub fn unavailable() -> Self {
        Self::new(UrlLabel::Unknown, 0.5, "AI scan unavailable")
    }

    pub fn cooling_down() -> Self {
        Self::new(UrlLabel::Unknown, 0.5, "AI cooldown active")
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

#[async_trait]
pub trait UrlClassifier: Send + Sync {
    async fn judge(&self, url: &str) -> Result<UrlLabel, ClassifierError>;
}

pub fn url_prompt(url: &str) -> String {
    format!(
        "You are a cybersecurity engine.\n\
         Analyze the URL below and classify it as SAFE or PHISHING.\n\
         Respond with only one word.\n\n\
         URL: {}\n",
        url
    )
}

/// Anything not mentioning PHISHING counts as SAFE
pub fn label_from_text(text: &str) -> UrlLabel {
    if text.trim().to_uppercase().contains("PHISHING") {
        UrlLabel::Phishing
    } else {
        UrlLabel::Safe
    }
}

pub struct GeminiUrlClassifier {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiUrlClassifier {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClassifierError {
    if err.is_timeout() {
        ClassifierError::Timeout
    } else {
        ClassifierError::Network(err.to_string())
    }
}

#[async_trait]
impl UrlClassifier for GeminiUrlClassifier {
    async fn judge(&self, url: &str) -> Result<UrlLabel, ClassifierError> {
        let endpoint = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": url_prompt(url) }] }],
        });

        let response = self.http_client
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        if status == 429 {
            return Err(ClassifierError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(ClassifierError::Http(status));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| ClassifierError::Malformed(e.to_string()))?;

        gemini_text(&value)
            .map(label_from_text)
            .ok_or_else(|| ClassifierError::Malformed("missing candidates[0].content.parts[0].text".to_string()))
    }
}

// ============================================================================
// URL AI
// ============================================================================

/// Deadline + breaker around an optional classifier
pub struct UrlAi {
    classifier: Option<Arc<dyn UrlClassifier>>,
    breaker: Arc<CircuitBreaker>,
    deadline: Duration,
}

impl UrlAi {
    pub fn new(classifier: Option<Arc<dyn UrlClassifier>>, breaker: Arc<CircuitBreaker>, deadline: Duration) -> Self {
        Self { classifier, breaker, deadline }
    }

    pub async fn assess(&self, url: &str) -> UrlAiResult {
        let Some(classifier) = &self.classifier else {
            return UrlAiResult::unavailable();
        };

        if self.breaker.is_open() {
            return UrlAiResult::cooling_down();
        }

        match tokio::time::timeout(self.deadline, classifier.judge(url)).await {
            Ok(Ok(label)) => UrlAiResult::judged(label),
            Ok(Err(e)) => {
                if e.is_rate_limit() {
                    self.breaker.trip();
                }
                log::debug!("URL AI failed for {}: {}", url, e);
                UrlAiResult::failed(&e)
            }
            Err(_) => UrlAiResult::timed_out(),
        }
    }
}

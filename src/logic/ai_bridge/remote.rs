//! Remote classifiers
//!
//! Blocking HTTP clients (ureq) with a per-call timeout and no retries; they
//! run on the scheduler thread.

use std::time::Duration;

use serde_json::{json, Value};

use super::prompt::parse_judgment;
use super::types::{AiJudgment, ClassifierError};
use crate::constants::{GEMINI_API_BASE, GROQ_API_URL};

/// "Submit text, receive a structured judgment, may fail or time out"
pub trait RemoteClassifier: Send + Sync {
    /// Source name recorded in verdicts
    fn name(&self) -> &str;

    fn classify(&self, prompt: &str) -> Result<AiJudgment, ClassifierError>;
}

fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new().timeout(timeout).build()
}

/// Map a ureq failure to the classifier taxonomy
fn map_ureq_error(err: ureq::Error) -> ClassifierError {
    match err {
        ureq::Error::Status(429, _) => ClassifierError::RateLimited,
        ureq::Error::Status(code, _) => ClassifierError::Http(code),
        ureq::Error::Transport(transport) => {
            let message = transport.to_string();
            if message.to_lowercase().contains("timed out") {
                ClassifierError::Timeout
            } else {
                ClassifierError::Network(message)
            }
        }
    }
}

fn read_json(response: ureq::Response) -> Result<Value, ClassifierError> {
    let body = response
        .into_string()
        .map_err(|e| ClassifierError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ClassifierError::Malformed(e.to_string()))
}

// ============================================================================
// GROQ (PRIMARY)
// ============================================================================

pub struct GroqClassifier {
    agent: ureq::Agent,
    api_key: String,
    model: String,
}

impl GroqClassifier {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Self {
        Self {
            agent: build_agent(timeout),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

impl RemoteClassifier for GroqClassifier {
    fn name(&self) -> &str {
        "Groq Llama 3"
    }

    fn classify(&self, prompt: &str) -> Result<AiJudgment, ClassifierError> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "response_format": { "type": "json_object" },
        });

        let response = self.agent
            .post(GROQ_API_URL)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(body)
            .map_err(map_ureq_error)?;

        let value = read_json(response)?;
        let content = value["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ClassifierError::Malformed("missing choices[0].message.content".to_string()))?;

        parse_judgment(content)
    }
}

// ============================================================================
// GEMINI (BACKUP)
// ============================================================================

pub struct GeminiClassifier {
    agent: ureq::Agent,
    api_key: String,
    model: String,
}

impl GeminiClassifier {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Self {
        Self {
            agent: build_agent(timeout),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

impl RemoteClassifier for GeminiClassifier {
    fn name(&self) -> &str {
        "Gemini 2.0 (Backup)"
    }

    fn classify(&self, prompt: &str) -> Result<AiJudgment, ClassifierError> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self.agent
            .post(&url)
            .set("x-goog-api-key", &self.api_key)
            .send_json(body)
            .map_err(map_ureq_error)?;

        let value = read_json(response)?;
        let text = gemini_text(&value)
            .ok_or_else(|| ClassifierError::Malformed("missing candidates[0].content.parts[0].text".to_string()))?;

        parse_judgment(text)
    }
}

/// Text of the first Gemini candidate
pub fn gemini_text(value: &Value) -> Option<&str> {
    value["candidates"][0]["content"]["parts"][0]["text"].as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_text_extraction() {
        let value = json!({
            "candidates": [{ "content": { "parts": [{ "text": "PHISHING" }] } }]
        });
        assert_eq!(gemini_text(&value), Some("PHISHING"));
        assert_eq!(gemini_text(&json!({ "error": "quota" })), None);
    }
}

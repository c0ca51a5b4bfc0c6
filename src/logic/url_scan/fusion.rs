//! URL decision fusion
//!
//! `risk = rule_score * 20 + ai_confidence * 60`. The AI confidence counts
//! whatever its label; only a phishing label adds a reason.

use serde::Serialize;

use super::ai::{UrlAiResult, UrlLabel};
use super::rules::RuleReport;

const RULE_WEIGHT: f64 = 20.0;
const AI_WEIGHT: f64 = 60.0;
const PHISHING_THRESHOLD: f64 = 80.0;
const SUSPICIOUS_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UrlStatus {
    Safe,
    Suspicious,
    Phishing,
}

impl UrlStatus {
    pub fn from_risk(risk: f64) -> Self {
        if risk >= PHISHING_THRESHOLD {
            UrlStatus::Phishing
        } else if risk >= SUSPICIOUS_THRESHOLD {
            UrlStatus::Suspicious
        } else {
            UrlStatus::Safe
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlEngineInfo {
    pub rule_score: u32,
    pub ai_label: UrlLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlDecision {
    pub url: String,
    pub status: UrlStatus,
    /// One decimal
    pub risk_score: f64,
    /// risk / 100, two decimals
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub engine: UrlEngineInfo,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn fuse(url: &str, rules: RuleReport, ai: &UrlAiResult) -> UrlDecision {
    let risk = rules.score as f64 * RULE_WEIGHT + ai.confidence * AI_WEIGHT;

    let mut reasons = rules.reasons;
    if ai.label == UrlLabel::Phishing {
        reasons.push("AI detected phishing behavior".to_string());
    }

    UrlDecision {
        url: url.to_string(),
        status: UrlStatus::from_risk(risk),
        risk_score: round_to(risk, 1),
        confidence: round_to(risk / 100.0, 2),
        reasons,
        engine: UrlEngineInfo {
            rule_score: rules.score,
            ai_label: ai.label,
        },
    }
}

//! Prompt building and response parsing

use serde_json::Value;

use super::types::{AiJudgment, ClassifierError};

/// Characters of content sent to the classifiers
pub const PROMPT_CONTENT_CHARS: usize = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Text,
    Assembly,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Text => "TEXT",
            AnalysisMode::Assembly => "ASSEMBLY",
        }
    }
}

/// Analyst prompt for one artifact
pub fn build_prompt(file_name: &str, mode: AnalysisMode, content: &str) -> String {
    let data: String = content.chars().take(PROMPT_CONTENT_CHARS).collect();
    format!(
        "Act as Security Analyst. Target: \"{}\" (Mode: {})\n\
         DATA: {}\n\
         TASK: Detect malicious intent.\n\
         OUTPUT JSON: {{\"is_malware\": bool, \"confidence\": int, \"reason\": \"str\"}}\n",
        file_name,
        mode.as_str(),
        data
    )
}

/// Strip markdown fences and keep the outermost JSON object
pub fn clean_json_response(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text).trim();

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

/// Parse a model answer into a judgment.
///
/// Missing fields fall back to `false` / `0` / `"No details"`.
pub fn parse_judgment(text: &str) -> Result<AiJudgment, ClassifierError> {
    let value: Value = serde_json::from_str(clean_json_response(text))
        .map_err(|e| ClassifierError::Malformed(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| ClassifierError::Malformed("expected a JSON object".to_string()))?;

    let is_malware = match object.get("is_malware") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    };

    let confidence = object
        .get("confidence")
        .and_then(Value::as_f64)
        .map(|c| c.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0);

    let reason = object
        .get("reason")
        .and_then(Value::as_str)
        .unwrap_or("No details")
        .to_string();

    Ok(AiJudgment { is_malware, confidence, reason })
}

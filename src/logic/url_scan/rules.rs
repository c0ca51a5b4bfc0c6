//! Rule-based URL scoring

use serde::Serialize;

use super::features::{host_of, is_ip_host, keyword_hits};

const RULE_KEYWORDS: &[&str] = &["login", "verify", "secure", "update", "account", "bank", "paypal"];

/// Score contributions
const IP_HOST_POINTS: u32 = 2;
const HYPHEN_LIMIT: usize = 3;
const MAX_HOST_LABELS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleReport {
    pub score: u32,
    pub reasons: Vec<String>,
}

pub fn rule_based_scan(url: &str) -> RuleReport {
    let mut report = RuleReport::default();
    let host = host_of(url);

    if is_ip_host(&host) {
        report.score += IP_HOST_POINTS;
        report.reasons.push("URL uses IP address instead of domain".to_string());
    }

    let hits = keyword_hits(url, RULE_KEYWORDS);
    report.score += hits as u32;
    if hits >= 2 {
        report.reasons.push("Multiple suspicious keywords detected".to_string());
    }

    if url.matches('-').count() >= HYPHEN_LIMIT {
        report.score += 1;
        report.reasons.push("URL contains excessive hyphens".to_string());
    }

    if host.split('.').count() > MAX_HOST_LABELS {
        report.score += 1;
        report.reasons.push("Too many subdomains".to_string());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_url_scores_zero() {
        let report = rule_based_scan("https://www.rust-lang.org/learn");
        assert_eq!(report.score, 0);
        assert!(report.reasons.is_empty());
    }

    #[test]
    fn test_every_rule_fires() {
        let report = rule_based_scan("http://192.168.10.20/paypal-login-verify-now");
        // ip 2 + keywords 3 + hyphens 1; host has exactly 4 labels
        assert_eq!(report.score, 6);
        assert_eq!(report.reasons.len(), 3);
    }

    #[test]
    fn test_single_keyword_has_no_reason() {
        let report = rule_based_scan("https://example.com/login");
        assert_eq!(report.score, 1);
        assert!(report.reasons.is_empty());
    }

    #[test]
    fn test_deep_subdomains() {
        let report = rule_based_scan("https://a.b.c.d.example.com/");
        assert_eq!(report.score, 1);
        assert_eq!(report.reasons, vec!["Too many subdomains".to_string()]);
    }
}

//! URL lexical features

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use serde::Serialize;

/// Dotted-quad at the start of the host
static IPV4_HOST: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+\.\d+").ok());

const FEATURE_KEYWORDS: &[&str] = &["login", "verify", "secure", "account", "update"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlFeatures {
    pub length: usize,
    pub has_ip: bool,
    pub has_https: bool,
    pub has_at_symbol: bool,
    pub suspicious_keywords: usize,
    pub subdomain_count: usize,
}

/// Host (with port, if any) of an absolute URL; empty when unparsable
pub(crate) fn host_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        },
        Err(_) => String::new(),
    }
}

pub(crate) fn is_ip_host(host: &str) -> bool {
    IPV4_HOST.as_ref().map(|re| re.is_match(host)).unwrap_or(false)
}

pub(crate) fn keyword_hits(url: &str, keywords: &[&str]) -> usize {
    let lowered = url.to_lowercase();
    keywords.iter().filter(|kw| lowered.contains(*kw)).count()
}

pub fn extract_url_features(url: &str) -> UrlFeatures {
    let host = host_of(url);
    UrlFeatures {
        length: url.len(),
        has_ip: is_ip_host(&host),
        has_https: Url::parse(url).map(|u| u.scheme() == "https").unwrap_or(false),
        has_at_symbol: url.contains('@'),
        suspicious_keywords: keyword_hits(url, FEATURE_KEYWORDS),
        subdomain_count: host.matches('.').count(),
    }
}

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::logic::ai_bridge::ClassifierError;

struct MockUrlClassifier {
    answer: Result<UrlLabel, ClassifierError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl MockUrlClassifier {
    fn new(answer: Result<UrlLabel, ClassifierError>) -> Arc<Self> {
        Self::slow(answer, Duration::ZERO)
    }

    fn slow(answer: Result<UrlLabel, ClassifierError>, delay: Duration) -> Arc<Self> {
        Arc::new(Self { answer, delay, calls: AtomicUsize::new(0) })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlClassifier for MockUrlClassifier {
    async fn judge(&self, _url: &str) -> Result<UrlLabel, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.answer.clone()
    }
}

fn scanner(classifier: Option<Arc<MockUrlClassifier>>, breaker: Arc<CircuitBreaker>) -> UrlScanner {
    let classifier = classifier.map(|c| c as Arc<dyn UrlClassifier>);
    UrlScanner::new(UrlAi::new(classifier, breaker, Duration::from_millis(100)))
}

fn breaker() -> Arc<CircuitBreaker> {
    Arc::new(CircuitBreaker::new(Duration::from_secs(60)))
}

#[tokio::test]
async fn test_phishing_url_decision() {
    let mock = MockUrlClassifier::new(Ok(UrlLabel::Phishing));
    let scanner = scanner(Some(mock.clone()), breaker());

    let decision = scanner.analyze("http://10.1.2.3/secure-bank-login").await;

    assert_eq!(decision.status, UrlStatus::Phishing);
    assert_eq!(decision.engine.ai_label, UrlLabel::Phishing);
    assert!(decision.reasons.contains(&"URL uses IP address instead of domain".to_string()));
    assert!(decision.reasons.contains(&"AI detected phishing behavior".to_string()));
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn test_missing_classifier_is_unavailable() {
    let scanner = scanner(None, breaker());
    let decision = scanner.analyze("https://example.com").await;

    assert_eq!(decision.engine.ai_label, UrlLabel::Unknown);
    assert_eq!(decision.risk_score, 30.0);
    assert_eq!(decision.status, UrlStatus::Safe);
}

#[tokio::test]
async fn test_deadline_maps_to_timeout() {
    let mock = MockUrlClassifier::slow(Ok(UrlLabel::Safe), Duration::from_secs(5));
    let ai = UrlAi::new(Some(mock as Arc<dyn UrlClassifier>), breaker(), Duration::from_millis(50));

    let result = ai.assess("https://example.com").await;
    assert_eq!(result, UrlAiResult::timed_out());
}

#[tokio::test]
async fn test_rate_limit_trips_shared_breaker() {
    let shared = breaker();
    let mock = MockUrlClassifier::new(Err(ClassifierError::RateLimited));
    let ai = UrlAi::new(Some(mock.clone() as Arc<dyn UrlClassifier>), shared.clone(), Duration::from_millis(100));

    let first = ai.assess("https://example.com").await;
    assert_eq!(first.label, UrlLabel::Unknown);
    assert_eq!(first.confidence, 0.4);
    assert!(shared.is_open());

    let second = ai.assess("https://example.com").await;
    assert_eq!(second, UrlAiResult::cooling_down());
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn test_generic_error_does_not_trip() {
    let shared = breaker();
    let mock = MockUrlClassifier::new(Err(ClassifierError::Http(503)));
    let ai = UrlAi::new(Some(mock as Arc<dyn UrlClassifier>), shared.clone(), Duration::from_millis(100));

    let result = ai.assess("https://example.com").await;
    assert_eq!(result.reasons, vec!["AI error: Unexpected HTTP status 503".to_string()]);
    assert!(!shared.is_open());
}

//! In-process classifier used by tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::remote::RemoteClassifier;
use super::types::{AiJudgment, ClassifierError};

pub struct MockClassifier {
    name: String,
    response: Mutex<Result<AiJudgment, ClassifierError>>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockClassifier {
    pub fn answering(name: &str, judgment: AiJudgment) -> Arc<Self> {
        Self::with_response(name, Ok(judgment))
    }

    pub fn failing(name: &str, error: ClassifierError) -> Arc<Self> {
        Self::with_response(name, Err(error))
    }

    fn with_response(name: &str, response: Result<AiJudgment, ClassifierError>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            response: Mutex::new(response),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn set_response(&self, response: Result<AiJudgment, ClassifierError>) {
        *self.response.lock() = response;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().clone()
    }
}

impl RemoteClassifier for MockClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn classify(&self, prompt: &str) -> Result<AiJudgment, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = Some(prompt.to_string());
        self.response.lock().clone()
    }
}

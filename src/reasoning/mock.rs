//! Scripted reasoning client for tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{ReasoningClient, ReasoningError};

/// Deterministic [`ReasoningClient`]: replays a scripted queue of responses,
/// then falls back to a configurable default outcome.
#[derive(Default)]
pub struct MockReasoningClient {
    script: Mutex<VecDeque<Result<String, ReasoningError>>>,
    default: Option<Result<String, ReasoningError>>,
}

impl MockReasoningClient {
    /// Empty script; calls beyond the script fail with a transport error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every unscripted call returns `text`.
    pub fn always_ok(text: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default: Some(Ok(text.into())),
        }
    }

    /// Every unscripted call returns `error`.
    pub fn always_err(error: ReasoningError) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default: Some(Err(error)),
        }
    }

    /// Queues a successful response.
    pub fn push_ok(&self, text: impl Into<String>) {
        self.script.lock().push_back(Ok(text.into()));
    }

    /// Queues a failure.
    pub fn push_err(&self, error: ReasoningError) {
        self.script.lock().push_back(Err(error));
    }

    /// Number of scripted responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl ReasoningClient for MockReasoningClient {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, ReasoningError> {
        if let Some(next) = self.script.lock().pop_front() {
            return next;
        }
        match &self.default {
            Some(outcome) => outcome.clone(),
            None => Err(ReasoningError::Transport {
                reason: "mock script exhausted".to_string(),
            }),
        }
    }
}

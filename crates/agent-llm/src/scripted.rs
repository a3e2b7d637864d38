//! Deterministic provider that replays canned responses
//!
//! Used by tests and offline runs of the demos. Every request is recorded so
//! callers can assert on the exact history and tools the model was shown.

use crate::{LlmError, LlmProvider, LlmRequest, LlmResponse, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;

enum Step {
    Respond(LlmResponse),
    Fail(String),
}

/// Provider returning queued responses in order
pub struct ScriptedLlm {
    model: String,
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedLlm {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            steps: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response
    pub fn then(self, response: LlmResponse) -> Self {
        self.push(Step::Respond(response));
        self
    }

    /// Queue a plain text answer
    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.then(LlmResponse::text(text))
    }

    /// Queue a single function call; ids are numbered by position
    pub fn then_call(self, name: impl Into<String>, args: serde_json::Value) -> Self {
        let id = format!("call_{}", self.remaining() + 1);
        self.then(LlmResponse::function_call(id, name, args))
    }

    /// Queue a backend failure
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(Step::Fail(message.into()));
        self
    }

    /// Number of queued steps not yet consumed
    pub fn remaining(&self) -> usize {
        self.steps.lock().map(|steps| steps.len()).unwrap_or_default()
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn push(&self, step: Step) {
        if let Ok(mut steps) = self.steps.lock() {
            steps.push_back(step);
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse> {
        debug!(model = %self.model, contents = request.contents.len(), "Scripted generate");
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let step = self
            .steps
            .lock()
            .map_err(|_| LlmError::UnexpectedResponse("script lock poisoned".to_string()))?
            .pop_front();

        match step {
            Some(Step::Respond(response)) => Ok(response),
            Some(Step::Fail(message)) => Err(LlmError::RequestFailed(message)),
            None => Err(LlmError::ScriptExhausted(self.model.clone())),
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

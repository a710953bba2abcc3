//! Test doubles shared by the pipeline and refinement tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use repodigest_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, Usage,
};

use crate::llm::LlmProvider;

/// Scripted provider: pops queued replies in order and records every
/// request it receives. An exhausted queue yields a provider error, which
/// doubles as the "remote call failed" case.
pub struct MockProvider {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(content) => Ok(CompletionResponse {
                id: format!("mock-{}", self.call_count()),
                content,
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 10,
                },
            }),
            None => Err(LlmError::Provider {
                message: "mock replies exhausted".to_string(),
            }),
        }
    }
}

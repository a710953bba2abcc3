//! Interactive refinement loop, IO-free half.
//!
//! The loop alternates between awaiting input and processing one completion
//! per input. The sentinel `bye` (exact, case-sensitive) terminates. Reading
//! lines and printing replies is the CLI runner's job; this type owns the
//! transcript and the state transitions so they are testable without a
//! terminal.

use repodigest_types::error::PipelineError;
use repodigest_types::llm::CompletionRequest;

use crate::llm::LlmProvider;
use crate::pipeline::PipelineOptions;
use crate::transcript::{SessionId, Transcript, TranscriptStore};

/// Literal input that ends the loop.
pub const TERMINATION_SENTINEL: &str = "bye";

/// Result of feeding one user input to the loop.
#[derive(Debug)]
pub enum Outcome {
    /// The model's reply, already appended to the transcript.
    Reply(String),
    /// The sentinel was entered; nothing was sent to the model.
    Terminated,
}

/// Conversation state for one refinement session.
pub struct RefinementLoop {
    store: TranscriptStore,
    session_id: SessionId,
    opts: PipelineOptions,
}

impl RefinementLoop {
    /// Start a session seeded with the aggregation answer as the first
    /// assistant turn, so follow-up questions refine it in context.
    pub fn new(opts: PipelineOptions, seed_answer: impl Into<String>) -> Self {
        let mut store = TranscriptStore::new();
        let session_id = SessionId::new();
        store.get_or_create(session_id).push_assistant(seed_answer);
        Self {
            store,
            session_id,
            opts,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn transcript(&self) -> &Transcript {
        self.store
            .get(&self.session_id)
            .expect("session created in new()")
    }

    /// Process one user input.
    ///
    /// The sentinel terminates without a model call. Anything else appends
    /// the user turn, issues exactly one completion carrying the whole
    /// accumulated transcript, appends the reply, and returns it.
    #[tracing::instrument(name = "refine_input", skip(self, provider, input), fields(session = %self.session_id))]
    pub async fn handle_input<P: LlmProvider>(
        &mut self,
        provider: &P,
        input: &str,
    ) -> Result<Outcome, PipelineError> {
        if input == TERMINATION_SENTINEL {
            tracing::debug!("termination sentinel received");
            return Ok(Outcome::Terminated);
        }

        let transcript = self.store.get_or_create(self.session_id);
        transcript.push_user(input);

        let request = CompletionRequest {
            model: self.opts.model.clone(),
            messages: transcript.messages(),
            system: None,
            max_tokens: self.opts.max_tokens,
            temperature: self.opts.temperature,
        };
        let response = provider.complete(&request).await?;

        transcript.push_assistant(response.content.clone());
        Ok(Outcome::Reply(response.content))
    }
}

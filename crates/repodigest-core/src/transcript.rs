//! In-memory session transcripts.
//!
//! `TranscriptStore` is an explicit context object mapping session ids to
//! append-only transcripts. It is owned by whoever runs the refinement loop;
//! there is no global store and nothing is persisted across restarts.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use repodigest_types::llm::{Message, MessageRole};

/// Opaque session identifier, unique per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One turn in a conversation.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: MessageRole,
    pub content: String,
    pub at: DateTime<Utc>,
}

/// Ordered, append-only conversation history for one session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(MessageRole::User, content.into());
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(MessageRole::Assistant, content.into());
    }

    fn push(&mut self, role: MessageRole, content: String) {
        self.turns.push(Turn {
            role,
            content,
            at: Utc::now(),
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The whole history as role-tagged messages, ready to send as context.
    pub fn messages(&self) -> Vec<Message> {
        self.turns
            .iter()
            .map(|t| Message {
                role: t.role,
                content: t.content.clone(),
            })
            .collect()
    }
}

/// Maps session ids to transcripts, creating on first reference.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    sessions: HashMap<SessionId, Transcript>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the transcript for a session, creating an empty one on first
    /// reference. A session id maps to exactly one transcript once created.
    pub fn get_or_create(&mut self, id: SessionId) -> &mut Transcript {
        self.sessions.entry(id).or_default()
    }

    pub fn get(&self, id: &SessionId) -> Option<&Transcript> {
        self.sessions.get(id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

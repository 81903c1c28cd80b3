//! Conversational session management
//!
//! A session owns a bounded conversation history and, once a retrieval
//! chain is attached, answers queries through it. Sessions are independent
//! of each other and must be driven by one caller at a time.

use crate::chain::{Answer, ConversationalChain};
use crate::error::{DocentError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Maximum number of turns retained in a conversation history
pub const HISTORY_CAPACITY: usize = 5;

/// One (query, answer) exchange, immutable once recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub query: String,
    pub answer: String,
    pub recorded_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(query: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// Capacity-bounded conversation history
///
/// Insertion appends; when the capacity is exceeded the oldest turn is
/// evicted first. Length never exceeds `HISTORY_CAPACITY` after an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    turns: VecDeque<ConversationTurn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, evicting the oldest when over capacity
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push_back(turn);
        while self.turns.len() > HISTORY_CAPACITY {
            self.turns.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns in insertion order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No retrieval chain attached yet
    Unbuilt,
    /// Chain attached; queries can be answered
    Ready,
}

/// A conversational question-answering session
pub struct ChatSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    chain: Option<ConversationalChain>,
    history: ConversationHistory,
}

impl ChatSession {
    /// Create a session in the `Unbuilt` state
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            chain: None,
            history: ConversationHistory::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Attach a retrieval chain, transitioning `Unbuilt -> Ready`
    ///
    /// Re-attaching on a `Ready` session replaces the chain (the user
    /// re-loaded documents); there is no transition back to `Unbuilt`.
    pub fn attach(&mut self, chain: ConversationalChain) {
        tracing::debug!("Session {} is ready", self.id);
        self.chain = Some(chain);
    }

    pub fn state(&self) -> SessionState {
        if self.chain.is_some() {
            SessionState::Ready
        } else {
            SessionState::Unbuilt
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == SessionState::Ready
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Answer a query using retrieval context plus the conversation so far
    ///
    /// On success the (query, answer) turn is appended to the history with
    /// FIFO eviction. On any failure the history is left untouched.
    pub async fn ask(&mut self, query: &str) -> Result<Answer> {
        let chain = self.chain.as_ref().ok_or(DocentError::PipelineNotBuilt)?;

        let query = query.trim();
        if query.is_empty() {
            return Err(DocentError::EmptyQuery);
        }

        let answer = chain
            .invoke(query, &self.history)
            .await
            .map_err(|e| DocentError::GenerationFailed { source: e.into() })?;

        self.history
            .push(ConversationTurn::new(query, answer.text.clone()));

        Ok(answer)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

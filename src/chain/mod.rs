//! Conversational retrieval chain
//!
//! Composes query condensation, retrieval, and generation into a single
//! call: the conversation history rephrases the incoming query into a
//! standalone question, the retriever supplies context chunks for it, and
//! the LLM produces the answer from question plus context.

use crate::document::DocumentChunk;
use crate::llm::{ChatMessage, ChatRequest, LlmError, LlmProvider};
use crate::retrieval::{RetrievalError, Retriever, ScoredChunk};
use crate::session::ConversationHistory;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Generation failed: {0}")]
    Llm(#[from] LlmError),
}

/// Text response plus the chunks the generation was conditioned on
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<DocumentChunk>,
}

/// Conversational retrieval chain
///
/// Stateless beyond wrapping its collaborators; the caller owns the
/// history and passes it in per call.
pub struct ConversationalChain {
    retriever: Arc<dyn Retriever>,
    llm: Arc<dyn LlmProvider>,
}

impl ConversationalChain {
    pub fn new(retriever: Arc<dyn Retriever>, llm: Arc<dyn LlmProvider>) -> Self {
        Self { retriever, llm }
    }

    /// Answer a query in the context of the conversation so far
    pub async fn invoke(
        &self,
        query: &str,
        history: &ConversationHistory,
    ) -> Result<Answer, ChainError> {
        // With no history the query already stands alone
        let standalone = if history.is_empty() {
            query.to_string()
        } else {
            self.condense(query, history).await?
        };

        let retrieved = self.retriever.retrieve(&standalone).await?;
        let text = self.generate(&standalone, &retrieved).await?;

        let sources = retrieved.into_iter().map(|s| s.chunk).collect();
        Ok(Answer { text, sources })
    }

    /// Rewrite a follow-up query into a standalone question
    async fn condense(
        &self,
        query: &str,
        history: &ConversationHistory,
    ) -> Result<String, ChainError> {
        let mut transcript = String::new();
        for turn in history.iter() {
            transcript.push_str(&format!("User: {}\n", turn.query));
            transcript.push_str(&format!("Assistant: {}\n", turn.answer));
        }

        let messages = vec![
            ChatMessage::system(
                "Rewrite the user's follow-up question as a single standalone question, \
                 using the conversation so far to resolve references. \
                 Return only the rewritten question.",
            ),
            ChatMessage::user(format!(
                "Conversation so far:\n{}\nFollow-up question: {}",
                transcript, query
            )),
        ];

        let standalone = self.llm.chat(ChatRequest::new(messages)).await?;
        let standalone = standalone.trim().to_string();

        tracing::debug!("Condensed query to: {}", standalone);
        Ok(standalone)
    }

    /// Generate the answer from the standalone question and its context
    async fn generate(
        &self,
        question: &str,
        context: &[ScoredChunk],
    ) -> Result<String, LlmError> {
        let mut context_block = String::new();
        for (i, scored) in context.iter().enumerate() {
            context_block.push_str(&format!("[{}] {}\n\n", i + 1, scored.chunk.text));
        }

        let messages = vec![
            ChatMessage::system(
                "You are a helpful assistant answering questions about the user's documents. \
                 Answer using only the provided context. \
                 If the context does not contain the answer, say so.",
            ),
            ChatMessage::user(format!(
                "Context:\n{}Question: {}",
                context_block, question
            )),
        ];

        self.llm.chat(ChatRequest::new(messages)).await
    }
}

//! Integration tests for the conversational session
//!
//! Drives `ChatSession` through a chain wired to mock retrieval and LLM
//! collaborators, exercising the history laws and failure behavior.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use docent::chain::ConversationalChain;
use docent::document::DocumentChunk;
use docent::error::DocentError;
use docent::llm::{ChatRequest, LlmError, LlmProvider};
use docent::retrieval::{RetrievalError, Retriever, ScoredChunk};
use docent::session::{ChatSession, SessionState};

/// Retriever returning one fixed chunk
struct FixedRetriever;

#[async_trait]
impl Retriever for FixedRetriever {
    async fn retrieve(&self, _query: &str) -> Result<Vec<ScoredChunk>, RetrievalError> {
        Ok(vec![ScoredChunk::new(
            DocumentChunk::new(0, "doc.pdf", "Paris is the capital of France."),
            0.95,
        )])
    }
}

/// LLM echoing the final user message, optionally failing on demand
struct EchoLlm {
    fail: AtomicBool,
}

impl EchoLlm {
    fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
        }
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl LlmProvider for EchoLlm {
    fn name(&self) -> &str {
        "echo"
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, LlmError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LlmError::ApiError {
                status: reqwest::StatusCode::TOO_MANY_REQUESTS,
                body: "quota exceeded".to_string(),
            });
        }

        let content = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(format!("echo: {}", content))
    }
}

fn ready_session(llm: Arc<EchoLlm>) -> ChatSession {
    let chain = ConversationalChain::new(Arc::new(FixedRetriever), llm);
    let mut session = ChatSession::new();
    session.attach(chain);
    session
}

#[tokio::test]
async fn test_unbuilt_session_rejects_queries() {
    let mut session = ChatSession::new();
    assert_eq!(session.state(), SessionState::Unbuilt);

    let result = session.ask("What is the capital of France?").await;
    assert!(matches!(result, Err(DocentError::PipelineNotBuilt)));
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_empty_query_rejected() {
    let mut session = ready_session(Arc::new(EchoLlm::new()));

    for query in ["", "   ", "\t\n"] {
        let result = session.ask(query).await;
        assert!(matches!(result, Err(DocentError::EmptyQuery)));
    }
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_single_ask_records_one_turn() {
    let mut session = ready_session(Arc::new(EchoLlm::new()));

    let answer = session.ask("What is the capital of France?").await.unwrap();

    assert!(!answer.text.is_empty());
    assert_eq!(answer.sources.len(), 1);
    assert_eq!(session.history().len(), 1);

    let turn = session.history().iter().next().unwrap();
    assert_eq!(turn.query, "What is the capital of France?");
    assert_eq!(turn.answer, answer.text);
}

#[tokio::test]
async fn test_fifo_eviction_after_six_asks() {
    let mut session = ready_session(Arc::new(EchoLlm::new()));

    for i in 1..=6 {
        session.ask(&format!("q{}", i)).await.unwrap();
    }

    assert_eq!(session.history().len(), 5);
    let queries: Vec<&str> = session.history().iter().map(|t| t.query.as_str()).collect();
    assert_eq!(queries, vec!["q2", "q3", "q4", "q5", "q6"]);
}

#[tokio::test]
async fn test_history_counts_match_ask_counts() {
    let mut session = ready_session(Arc::new(EchoLlm::new()));

    for n in 1..=8usize {
        session.ask(&format!("question number {}", n)).await.unwrap();
        assert_eq!(session.history().len(), n.min(5));
    }
}

#[tokio::test]
async fn test_failed_generation_leaves_history_unchanged() {
    let llm = Arc::new(EchoLlm::new());
    let mut session = ready_session(llm.clone());

    session.ask("q1").await.unwrap();
    session.ask("q2").await.unwrap();
    let before = session.history().clone();

    llm.set_failing(true);
    let result = session.ask("q3").await;
    assert!(matches!(result, Err(DocentError::GenerationFailed { .. })));
    assert_eq!(session.history(), &before);

    // Recovery: the next successful ask appends normally
    llm.set_failing(false);
    session.ask("q4").await.unwrap();
    assert_eq!(session.history().len(), 3);
}

#[tokio::test]
async fn test_query_whitespace_trimmed_before_recording() {
    let mut session = ready_session(Arc::new(EchoLlm::new()));

    session.ask("  padded question  ").await.unwrap();

    let turn = session.history().iter().next().unwrap();
    assert_eq!(turn.query, "padded question");
}

//! Hybrid retrieval and reranking
//!
//! Combines keyword and embedding search with weighted rank fusion, then
//! reranks the fused candidates with a cross-encoder. The `IndexBuilder`
//! turns document locators into a ready-to-query `RetrievalPipeline`.

mod builder;
mod fusion;
mod pipeline;
mod reranker;

pub use builder::IndexBuilder;
pub use fusion::{weighted_rank_fusion, FusionConfig, FusionError};
pub use pipeline::{RetrievalError, RetrievalPipeline, Retriever};
pub use reranker::{CrossEncoderReranker, RerankError, Reranker};

use crate::document::DocumentChunk;

/// A chunk paired with its retrieval relevance score
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub score: f32,
}

impl ScoredChunk {
    pub fn new(chunk: DocumentChunk, score: f32) -> Self {
        Self { chunk, score }
    }
}

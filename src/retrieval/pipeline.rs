//! Query-ready retrieval pipeline
//!
//! Wires the chunk store, both indexes, the embedding provider, and the
//! reranker into one `Retriever`. Retrieval runs each sub-search and the
//! rerank sequentially; the pipeline is immutable once built.

use crate::config::{IndexingConfig, RetrievalConfig};
use crate::document::DocumentChunk;
use crate::embedding::{EmbeddingProvider, KeywordIndex, VectorIndex};
use crate::retrieval::{weighted_rank_fusion, FusionConfig, Reranker, ScoredChunk};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Embedding generation failed: {0}")]
    EmbeddingError(String),

    #[error("Vector search failed: {0}")]
    VectorSearchError(String),

    #[error("Keyword search failed: {0}")]
    KeywordSearchError(String),

    #[error("Reranking failed: {0}")]
    RerankingError(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Fused result referenced unknown chunk id {0}")]
    UnknownChunk(u64),
}

/// Trait for retrievers
///
/// Given a query, returns a ranked list of relevant chunks.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Vec<ScoredChunk>, RetrievalError>;
}

/// Hybrid, reranked retrieval pipeline
pub struct RetrievalPipeline {
    chunks: Vec<DocumentChunk>,
    provider: Arc<dyn EmbeddingProvider>,
    keyword_index: KeywordIndex,
    vector_index: VectorIndex,
    reranker: Arc<dyn Reranker>,
    retrieval: RetrievalConfig,
    indexing: IndexingConfig,
}

impl RetrievalPipeline {
    pub(crate) fn new(
        chunks: Vec<DocumentChunk>,
        provider: Arc<dyn EmbeddingProvider>,
        keyword_index: KeywordIndex,
        vector_index: VectorIndex,
        reranker: Arc<dyn Reranker>,
        retrieval: RetrievalConfig,
        indexing: IndexingConfig,
    ) -> Self {
        Self {
            chunks,
            provider,
            keyword_index,
            vector_index,
            reranker,
            retrieval,
            indexing,
        }
    }

    /// Number of chunks in the pipeline's store
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    fn chunk(&self, id: u64) -> Result<&DocumentChunk, RetrievalError> {
        self.chunks
            .get(id as usize)
            .ok_or(RetrievalError::UnknownChunk(id))
    }
}

#[async_trait]
impl Retriever for RetrievalPipeline {
    async fn retrieve(&self, query: &str) -> Result<Vec<ScoredChunk>, RetrievalError> {
        if query.trim().is_empty() {
            return Err(RetrievalError::InvalidQuery(
                "Query text cannot be empty".to_string(),
            ));
        }

        let k = self.retrieval.per_index_k;

        // Each sub-index contributes its own top-k candidate set
        let query_embedding = self
            .provider
            .embed(query)
            .map_err(|e| RetrievalError::EmbeddingError(e.to_string()))?;

        let embedding_results = self
            .vector_index
            .search(&query_embedding, k, self.indexing.hnsw_ef_search)
            .map_err(|e| RetrievalError::VectorSearchError(e.to_string()))?;

        let lexical_results = self
            .keyword_index
            .search(query, k)
            .map_err(|e| RetrievalError::KeywordSearchError(e.to_string()))?;

        // Merge the two ranked lists into one
        let fusion_config = FusionConfig::new(
            self.retrieval.rrf_k,
            self.retrieval.lexical_weight,
            self.retrieval.embedding_weight,
        )
        .map_err(|e| RetrievalError::InvalidQuery(e.to_string()))?;

        let fused = weighted_rank_fusion(&lexical_results, &embedding_results, &fusion_config);

        let candidates: Vec<&DocumentChunk> = fused
            .iter()
            .map(|hit| self.chunk(hit.id))
            .collect::<Result<_, _>>()?;

        // Second-pass relevance scoring, truncated to top-n
        let texts: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();
        let reranked = self
            .reranker
            .rerank(query, &texts, self.retrieval.rerank_top_n)
            .map_err(|e| RetrievalError::RerankingError(e.to_string()))?;

        let results = reranked
            .into_iter()
            .map(|(idx, score)| ScoredChunk::new(candidates[idx].clone(), score))
            .collect();

        Ok(results)
    }
}

//! Embedding generation and per-modality indexes
//!
//! - `EmbeddingProvider` trait for abstraction over embedding backends
//! - `FastEmbedProvider` for local embedding (all-MiniLM-L6-v2, 384-dim)
//! - Tantivy for keyword (BM25) search
//! - HNSW for embedding similarity search
//!
//! Both indexes live in memory for the lifetime of one retrieval pipeline;
//! nothing is persisted.

mod keyword_index;
mod provider;
mod vector_index;

pub use keyword_index::{KeywordIndex, KeywordIndexError};
pub use provider::{EmbeddingError, EmbeddingProvider, FastEmbedProvider};
pub use vector_index::{VectorIndex, VectorIndexError};

/// Ranked hit from either index: chunk id and relevance score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredId {
    pub id: u64,
    pub score: f32,
}

//! Index builder
//!
//! Transforms raw document locators into a query-ready hybrid, reranked
//! retrieval pipeline. The build is atomic: any failure aborts the whole
//! build and no partial pipeline escapes.

use crate::config::Config;
use crate::document::{DocumentChunk, DocumentLoader, TextSplitter};
use crate::embedding::{EmbeddingProvider, KeywordIndex, VectorIndex};
use crate::error::{DocentError, Result};
use crate::retrieval::{Reranker, RetrievalPipeline};
use std::sync::Arc;

/// Builds retrieval pipelines from document sources
pub struct IndexBuilder {
    loader: Arc<dyn DocumentLoader>,
    provider: Arc<dyn EmbeddingProvider>,
    reranker: Arc<dyn Reranker>,
    config: Config,
}

impl IndexBuilder {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        provider: Arc<dyn EmbeddingProvider>,
        reranker: Arc<dyn Reranker>,
        config: Config,
    ) -> Self {
        Self {
            loader,
            provider,
            reranker,
            config,
        }
    }

    /// Build a retrieval pipeline over the given document sources
    ///
    /// Loads every source, splits into chunks, embeds, and populates both
    /// indexes. Fails with `EmptySourceSet` for an empty source list and
    /// `SourceUnavailable` for any locator that cannot be resolved.
    pub async fn build(&self, sources: &[String]) -> Result<RetrievalPipeline> {
        if sources.is_empty() {
            return Err(DocentError::EmptySourceSet);
        }

        let chunk_size = self.config.document.chunk_size;
        let chunk_overlap = self.config.document.chunk_overlap;
        if chunk_overlap >= chunk_size {
            return Err(DocentError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }

        let splitter = TextSplitter::new(chunk_size, chunk_overlap);

        // One document per locator, split and concatenated in source order
        let mut chunks: Vec<DocumentChunk> = Vec::new();
        for locator in sources {
            let text = self.loader.load(locator).await.map_err(|e| {
                DocentError::SourceUnavailable {
                    locator: locator.clone(),
                    source: e.into(),
                }
            })?;

            let pieces = splitter.split(&text);
            if pieces.is_empty() {
                return Err(DocentError::SplitFailure(format!(
                    "Document {} produced no usable text",
                    locator
                )));
            }

            tracing::info!("Split {} into {} chunks", locator, pieces.len());

            for piece in pieces {
                let id = chunks.len() as u64;
                chunks.push(DocumentChunk::new(id, locator.clone(), piece));
            }
        }

        // Embed all chunks in batches
        let mut embeddings: Vec<(u64, Vec<f32>)> = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(self.config.embedding.batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let vectors = self
                .provider
                .embed_batch(&texts)
                .map_err(|e| DocentError::IndexingFailure(e.to_string()))?;

            for (chunk, vector) in batch.iter().zip(vectors) {
                embeddings.push((chunk.id, vector));
            }
        }

        // Populate the vector index
        let mut vector_index = VectorIndex::new(
            self.provider.dimension(),
            chunks.len(),
            self.config.indexing.hnsw_ef_construction,
            self.config.indexing.hnsw_m,
        );
        vector_index
            .insert_batch(&embeddings)
            .map_err(|e| DocentError::IndexingFailure(e.to_string()))?;

        // Populate the keyword index
        let mut keyword_index =
            KeywordIndex::new().map_err(|e| DocentError::IndexingFailure(e.to_string()))?;
        let items: Vec<(u64, String)> = chunks.iter().map(|c| (c.id, c.text.clone())).collect();
        keyword_index
            .insert_batch(&items)
            .map_err(|e| DocentError::IndexingFailure(e.to_string()))?;
        keyword_index
            .commit()
            .map_err(|e| DocentError::IndexingFailure(e.to_string()))?;

        tracing::info!(
            "Indexed {} chunks from {} sources",
            chunks.len(),
            sources.len()
        );

        Ok(RetrievalPipeline::new(
            chunks,
            self.provider.clone(),
            keyword_index,
            vector_index,
            self.reranker.clone(),
            self.config.retrieval.clone(),
            self.config.indexing.clone(),
        ))
    }
}

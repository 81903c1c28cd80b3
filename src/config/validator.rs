use crate::config::Config;
use crate::error::{DocentError, Result, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_document(config, &mut errors);
        Self::validate_embedding(config, &mut errors);
        Self::validate_indexing(config, &mut errors);
        Self::validate_retrieval(config, &mut errors);
        Self::validate_llm(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DocentError::ConfigValidation { errors })
        }
    }

    fn validate_document(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.document.chunk_size == 0 {
            errors.push(ValidationError::new(
                "document.chunk_size",
                "Chunk size must be greater than 0",
            ));
        }

        if config.document.chunk_overlap >= config.document.chunk_size {
            errors.push(ValidationError::new(
                "document.chunk_overlap",
                format!(
                    "Chunk overlap ({}) must be smaller than chunk size ({})",
                    config.document.chunk_overlap, config.document.chunk_size
                ),
            ));
        }
    }

    fn validate_embedding(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.embedding.model.is_empty() {
            errors.push(ValidationError::new(
                "embedding.model",
                "Model name cannot be empty",
            ));
        }

        if config.embedding.batch_size == 0 {
            errors.push(ValidationError::new(
                "embedding.batch_size",
                "Batch size must be greater than 0",
            ));
        }
    }

    fn validate_indexing(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.indexing.vector_dim == 0 {
            errors.push(ValidationError::new(
                "indexing.vector_dim",
                "Vector dimension must be greater than 0",
            ));
        }

        if config.indexing.hnsw_ef_construction == 0 {
            errors.push(ValidationError::new(
                "indexing.hnsw_ef_construction",
                "HNSW ef_construction must be greater than 0",
            ));
        }

        if config.indexing.hnsw_m == 0 {
            errors.push(ValidationError::new(
                "indexing.hnsw_m",
                "HNSW M must be greater than 0",
            ));
        }
    }

    fn validate_retrieval(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.retrieval.per_index_k == 0 {
            errors.push(ValidationError::new(
                "retrieval.per_index_k",
                "Per-index candidate count must be greater than 0",
            ));
        }

        // Weights are relative scalars; negative values are meaningless
        if config.retrieval.lexical_weight < 0.0 {
            errors.push(ValidationError::new(
                "retrieval.lexical_weight",
                "Lexical weight must be non-negative",
            ));
        }

        if config.retrieval.embedding_weight < 0.0 {
            errors.push(ValidationError::new(
                "retrieval.embedding_weight",
                "Embedding weight must be non-negative",
            ));
        }

        if config.retrieval.lexical_weight == 0.0 && config.retrieval.embedding_weight == 0.0 {
            errors.push(ValidationError::new(
                "retrieval.lexical_weight",
                "At least one retrieval weight must be positive",
            ));
        }

        if config.retrieval.rerank_top_n == 0 {
            errors.push(ValidationError::new(
                "retrieval.rerank_top_n",
                "Rerank top-n must be greater than 0",
            ));
        }
    }

    fn validate_llm(config: &Config, errors: &mut Vec<ValidationError>) {
        let provider = &config.llm.provider;
        let valid_providers = ["groq", "openai", "together", "ollama"];
        if !valid_providers.contains(&provider.as_str()) {
            errors.push(ValidationError::new(
                "llm.provider",
                format!(
                    "Provider must be one of {:?}, got '{}'",
                    valid_providers, provider
                ),
            ));
        }

        if config.llm.base_url.is_empty() {
            errors.push(ValidationError::new(
                "llm.base_url",
                "Base URL cannot be empty",
            ));
        }

        if config.llm.model.is_empty() {
            errors.push(ValidationError::new(
                "llm.model",
                "Model identifier cannot be empty",
            ));
        }

        if config.llm.api_key_env.is_empty() {
            errors.push(ValidationError::new(
                "llm.api_key_env",
                "API key environment variable name cannot be empty",
            ));
        }
    }
}

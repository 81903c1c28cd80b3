use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the docent application
#[derive(Error, Debug)]
pub enum DocentError {
    /// No document sources were supplied to the index builder
    #[error("No document sources were provided")]
    EmptySourceSet,

    /// A document locator could not be fetched or parsed
    #[error("Source unavailable: {locator}: {source}")]
    SourceUnavailable {
        locator: String,
        #[source]
        source: anyhow::Error,
    },

    /// A document produced no usable text when split into chunks
    #[error("Failed to split document text: {0}")]
    SplitFailure(String),

    /// Embedding or index construction failed during the build
    #[error("Index construction failed: {0}")]
    IndexingFailure(String),

    /// A query was submitted before the retrieval pipeline was built
    #[error("Retrieval pipeline has not been built yet")]
    PipelineNotBuilt,

    /// The query text was empty after trimming whitespace
    #[error("Query is empty")]
    EmptyQuery,

    /// The retrieval or generation call failed
    #[error("Answer generation failed: {source}")]
    GenerationFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for docent operations
pub type Result<T> = std::result::Result<T, DocentError>;

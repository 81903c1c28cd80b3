//! Document loading and splitting
//!
//! Turns document locators (URLs or local paths) into bounded, overlapping
//! text chunks ready for indexing.

mod loader;
mod splitter;

pub use loader::{DocumentLoader, LoadError, PdfLoader};
pub use splitter::TextSplitter;

use serde::{Deserialize, Serialize};

/// A contiguous span of text extracted from a source document
///
/// Immutable once created. The id is the chunk's position in the flat
/// cross-source sequence owned by the retrieval pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Position in the flat chunk sequence
    pub id: u64,
    /// Locator of the document this chunk came from
    pub source: String,
    /// Chunk text, at most chunk_size characters
    pub text: String,
}

impl DocumentChunk {
    pub fn new(id: u64, source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
            text: text.into(),
        }
    }
}

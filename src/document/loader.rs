//! Document loaders
//!
//! A loader resolves a locator (URL or local path) to the full raw text of
//! one document. PDF content is extracted to plain text; anything else is
//! treated as UTF-8 text.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to fetch {url}: {source}")]
    FetchError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Remote server returned {status} for {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract text from {locator}: {message}")]
    ExtractError { locator: String, message: String },
}

/// Trait for document loaders
///
/// Resolves one locator to one document's full text.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, locator: &str) -> Result<String, LoadError>;
}

/// Loader for PDF documents referenced by URL or local path
pub struct PdfLoader {
    client: reqwest::Client,
}

impl PdfLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::FetchError {
                url: url.to_string(),
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(LoadError::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| LoadError::FetchError {
            url: url.to_string(),
            source: e,
        })?;

        Ok(bytes.to_vec())
    }

    fn extract_text(&self, locator: &str, data: &[u8]) -> Result<String, LoadError> {
        if data.starts_with(b"%PDF") {
            let text =
                pdf_extract::extract_text_from_mem(data).map_err(|e| LoadError::ExtractError {
                    locator: locator.to_string(),
                    message: e.to_string(),
                })?;
            tracing::debug!("Extracted {} characters from {}", text.chars().count(), locator);
            Ok(text)
        } else {
            // Not a PDF; assume plain text
            String::from_utf8(data.to_vec()).map_err(|e| LoadError::ExtractError {
                locator: locator.to_string(),
                message: format!("Document is neither PDF nor UTF-8 text: {}", e),
            })
        }
    }
}

impl Default for PdfLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentLoader for PdfLoader {
    async fn load(&self, locator: &str) -> Result<String, LoadError> {
        let data = if locator.starts_with("http://") || locator.starts_with("https://") {
            tracing::info!("Fetching document from {}", locator);
            self.fetch(locator).await?
        } else {
            tracing::info!("Reading document from {}", locator);
            std::fs::read(Path::new(locator)).map_err(|e| LoadError::ReadError {
                path: locator.to_string(),
                source: e,
            })?
        };

        self.extract_text(locator, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_local_file() {
        let loader = PdfLoader::new();
        let result = loader.load("/nonexistent/document.pdf").await;
        assert!(matches!(result, Err(LoadError::ReadError { .. })));
    }

    #[tokio::test]
    async fn test_plain_text_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        std::fs::write(&path, "Plain text content for testing.").unwrap();

        let loader = PdfLoader::new();
        let text = loader.load(path.to_str().unwrap()).await.unwrap();
        assert_eq!(text, "Plain text content for testing.");
    }

    #[tokio::test]
    async fn test_invalid_bytes() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("garbage.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x01]).unwrap();

        let loader = PdfLoader::new();
        let result = loader.load(path.to_str().unwrap()).await;
        assert!(matches!(result, Err(LoadError::ExtractError { .. })));
    }
}

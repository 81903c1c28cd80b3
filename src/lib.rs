//! Docent - Conversational RAG over PDF documents
//!
//! A CLI application that indexes user-supplied PDF documents into a hybrid
//! retrieval pipeline (BM25 keyword search + embedding similarity search,
//! fused and reranked) and answers natural-language questions with a hosted
//! LLM, either one-shot or as a multi-turn chat with bounded history.

pub mod chain;
pub mod cli;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod retrieval;
pub mod session;

pub use error::{DocentError, Result};

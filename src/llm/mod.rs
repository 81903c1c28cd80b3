//! LLM generation endpoint
//!
//! Provider trait plus a hosted OpenAI-compatible chat completions client.
//! Sampling parameters are fixed by the application and attached to every
//! request; they are not user-configurable at runtime.

mod hosted;
mod provider;
mod types;

pub use hosted::HostedProvider;
pub use provider::{LlmError, LlmProvider};
pub use types::{ChatMessage, ChatRequest};

/// Fixed sampling temperature
pub const TEMPERATURE: f64 = 0.5;

/// Fixed nucleus-sampling top-p
pub const TOP_P: f64 = 1.0;

/// Fixed cap on generated tokens
pub const MAX_TOKENS: u32 = 1000;

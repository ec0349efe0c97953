//! LLM-backed diff analysis for Vigil PR review
//!
//! Implements the reasoning collaborator seam against any
//! OpenAI-compatible chat-completions endpoint.

pub mod analyst;
pub mod error;

pub use analyst::OpenAiAnalyst;
pub use error::{Error, Result};

//! # et-client
//!
//! Claude Messages API client and prompt builders for the two annotation
//! strategies:
//!
//! | Strategy | Model is asked for |
//! |----------|--------------------|
//! | Full rewrite | The whole document back, with headings inserted |
//! | Edit trick | A compact JSON array of anchored edit operations |
//!
//! The client is a pass-through boundary: one blocking-point `POST` to
//! `/v1/messages`, response text and token usage back. No retries, no
//! streaming; transient failures surface as [`ClientError::Transient`] and
//! the caller decides what to do.

pub mod client;
pub mod prompt;

pub use client::{ClaudeClient, ClaudeConfig, ClientError, Completion, TokenUsage};
pub use prompt::PromptBuilder;

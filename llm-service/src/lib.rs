//! Chat-completions client shared by the review pipeline.
//!
//! Works against any OpenAI-compatible `/chat/completions` endpoint and keeps
//! errors, env handling and request shaping in one place.

pub mod chat_service;
pub mod config;
pub mod error_handler;

pub use chat_service::ChatService;
pub use config::ChatModelConfig;
pub use error_handler::{ConfigError, LlmServiceError};

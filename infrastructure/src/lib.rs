//! Infrastructure layer for ragchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod api;
pub mod config;

// Re-export commonly used types
pub use api::{
    client::ApiClient,
    error::{ApiError, Result},
    gateway::HttpChatGateway,
    sse::SseParser,
};
pub use config::{ConfigLoader, FileChatConfig, FileConfig, FileReplConfig, FileServerConfig};

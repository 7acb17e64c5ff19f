//! Domain layer for ragchat
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Streamed reply assembly
//!
//! The chat server answers with a chunked event stream. Each record carries
//! a token, an authoritative full response, or conversation metadata.
//! [`ReplyAssembly`](chat::assembly::ReplyAssembly) folds the event sequence
//! into the assistant's reply and yields a snapshot after every event so the
//! presentation layer can re-render incrementally.
//!
//! ## Scenarios and knowledge bases
//!
//! Every conversation belongs to a [`Scenario`](chat::entities::Scenario)
//! (product manual, ops assistant, requirement mining, test-case generation)
//! and may be grounded in a knowledge base selected by the user.

pub mod chat;
pub mod core;
pub mod export;
pub mod knowledge;

// Re-export commonly used types
pub use chat::{
    assembly::{FinalReply, ReplyAssembly, ReplySnapshot},
    entities::{Conversation, ConversationGroup, Message, Role, Scenario},
    stream::StreamEvent,
};
pub use core::error::DomainError;
pub use export::table::{extract_table, table_to_csv};
pub use knowledge::KnowledgeBase;

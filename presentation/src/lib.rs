//! Presentation layer for ragchat
//!
//! This crate contains CLI definitions, output formatters,
//! the streaming reply printer, and the interactive chat REPL.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::printer::StreamPrinter;

//! Chat domain.
//!
//! - [`entities::Conversation`] — a stored conversation with its title
//! - [`entities::Message`] — a single message within a conversation
//! - [`stream::StreamEvent`] — one event of a streamed assistant reply
//! - [`assembly::ReplyAssembly`] — folds stream events into the reply

pub mod assembly;
pub mod entities;
pub mod stream;

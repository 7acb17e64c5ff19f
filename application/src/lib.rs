//! Application layer for ragchat
//!
//! This crate contains use cases, port definitions, and session state.
//! It depends only on the domain layer.

pub mod ports;
pub mod session;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_gateway::{ChatGateway, ChatPrompt, GatewayError, StreamHandle, StreamItem},
    reply_observer::{NoReplyObserver, ReplyObserver},
};
pub use session::ChatSession;
pub use use_cases::export_testcases::{ExportError, ExportTestCasesUseCase, TestCaseExport};
pub use use_cases::send_message::{ReplyOutcome, SendMessageError, SendMessageUseCase};

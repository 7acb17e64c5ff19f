//! HTTP adapter for the chat server's REST + event-stream API.
//!
//! - [`client::ApiClient`] — thin reqwest wrapper over the endpoints
//! - [`sse::SseParser`] — incremental event-stream record framing
//! - [`gateway::HttpChatGateway`] — [`ChatGateway`](ragchat_application::ChatGateway)
//!   implementation bridging the two

pub mod client;
pub mod error;
pub mod gateway;
pub mod protocol;
pub mod sse;

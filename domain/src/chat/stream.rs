//! Streaming events for an in-flight assistant reply.
//!
//! [`StreamEvent`] represents individual events parsed from the chat
//! server's event stream, enabling real-time display of the reply as it
//! is generated.
//!
//! One wire record may carry several independent fields and therefore
//! expand to several events; the SSE parser in the infrastructure layer
//! performs that expansion.

/// An event in a streaming assistant reply.
///
/// Used to bridge infrastructure-level streaming (SSE chunks from the
/// chat endpoint) to the application layer, enabling incremental
/// re-rendering while the reply is still being generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text fragment to append to the accumulated reply.
    Token(String),
    /// The server's authoritative final text. Replaces whatever the
    /// tokens accumulated so far (server-side post-processing may make
    /// the two differ).
    FullResponse(String),
    /// The server created a conversation for this exchange; the client
    /// should adopt this id and refresh its history list.
    NewConversation(String),
    /// A server-generated conversation title.
    Title(String),
    /// End-of-stream sentinel (`[DONE]`).
    Done,
}

impl StreamEvent {
    /// Returns the reply text carried by this event, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Token(s) | StreamEvent::FullResponse(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done)
    }
}

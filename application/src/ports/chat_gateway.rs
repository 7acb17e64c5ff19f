//! Chat gateway port
//!
//! Defines the interface for communicating with the chat server.

use async_trait::async_trait;
use ragchat_domain::{Conversation, ConversationGroup, KnowledgeBase, Message, Role, Scenario, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Errors that can occur during chat gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    #[error("Transport closed")]
    TransportClosed,
}

/// One item on a reply stream: an event, or the transport error that
/// ended the stream. The event union itself carries no error variant, so
/// failures travel out-of-band.
pub type StreamItem = Result<StreamEvent, GatewayError>;

/// Everything the server needs to answer one chat message.
#[derive(Debug, Clone)]
pub struct ChatPrompt {
    pub message: String,
    pub scenario: Scenario,
    /// Existing conversation to continue, or `None` to let the server
    /// create one (it then streams back a `NewConversation` event).
    pub conversation_id: Option<String>,
    /// Knowledge base grounding the retrieval step, if selected.
    pub knowledge_base_id: Option<String>,
}

/// Handle for receiving streamed reply events from an in-flight chat
/// request.
///
/// Wraps an `mpsc::Receiver<StreamItem>`. The sender side lives in the
/// gateway's reader task and closes on end-of-stream, cancellation, or
/// transport failure.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamItem>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamItem>) -> Self {
        Self { receiver }
    }
}

/// Gateway for chat server communication
///
/// This port defines how the application layer talks to the server.
/// The HTTP implementation (adapter) lives in the infrastructure layer.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send a chat message and stream the assistant's reply.
    ///
    /// The returned handle yields events until the stream finishes or the
    /// token is cancelled; after cancellation the sender stops without a
    /// terminal event.
    async fn stream_chat(
        &self,
        prompt: &ChatPrompt,
        cancel: CancellationToken,
    ) -> Result<StreamHandle, GatewayError>;

    /// Conversation history for a scenario, grouped by server-side time
    /// buckets.
    async fn history(
        &self,
        scenario: Scenario,
        knowledge_base_id: Option<&str>,
    ) -> Result<Vec<ConversationGroup>, GatewayError>;

    /// All messages of one conversation, oldest first.
    async fn conversation_messages(&self, conversation_id: &str)
        -> Result<Vec<Message>, GatewayError>;

    /// Create an empty conversation in the given scenario.
    async fn create_conversation(
        &self,
        scenario: Scenario,
        knowledge_base_id: Option<&str>,
    ) -> Result<Conversation, GatewayError>;

    /// Rename a conversation.
    async fn rename_conversation(
        &self,
        conversation_id: &str,
        title: &str,
    ) -> Result<(), GatewayError>;

    /// Delete a conversation.
    async fn delete_conversation(&self, conversation_id: &str) -> Result<(), GatewayError>;

    /// Knowledge bases available for retrieval grounding.
    async fn knowledge_bases(&self) -> Result<Vec<KnowledgeBase>, GatewayError>;

    /// The most recent assistant message of a conversation, if any.
    ///
    /// Default implementation scans [`conversation_messages`](Self::conversation_messages).
    async fn latest_assistant_message(
        &self,
        conversation_id: &str,
    ) -> Result<Option<String>, GatewayError> {
        let messages = self.conversation_messages(conversation_id).await?;
        Ok(messages
            .into_iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content))
    }
}

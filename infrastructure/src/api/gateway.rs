//! HTTP implementation of the [`ChatGateway`] port.
//!
//! [`HttpChatGateway`] bridges the server's chunked event-stream body to
//! an mpsc channel of [`StreamEvent`]s via a background reader task. The
//! task honors the request's cancellation token between chunks: when the
//! token fires, the response body is dropped (aborting the underlying
//! request) and no further events are forwarded.

use crate::api::client::ApiClient;
use crate::api::protocol::ChatRequestBody;
use crate::api::sse::SseParser;
use async_trait::async_trait;
use futures::StreamExt;
use ragchat_application::{ChatGateway, ChatPrompt, GatewayError, StreamHandle, StreamItem};
use ragchat_domain::{Conversation, ConversationGroup, KnowledgeBase, Message, Scenario};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Reassembles UTF-8 text from byte chunks whose boundaries may split a
/// multi-byte character (streamed replies are not ASCII-only).
#[derive(Debug, Default)]
struct Utf8Accumulator {
    pending: Vec<u8>,
}

impl Utf8Accumulator {
    /// Append raw bytes, returning the longest decodable prefix.
    fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        match std::str::from_utf8(&self.pending) {
            Ok(s) => {
                let text = s.to_string();
                self.pending.clear();
                text
            }
            Err(e) => {
                let valid = e.valid_up_to();
                let mut text =
                    String::from_utf8(self.pending[..valid].to_vec()).unwrap_or_default();
                self.pending.drain(..valid);
                if let Some(len) = e.error_len() {
                    // Genuinely invalid sequence, not a split character.
                    self.pending.drain(..len);
                    text.push(char::REPLACEMENT_CHARACTER);
                }
                text
            }
        }
    }
}

/// Chat gateway implementation over the server's HTTP API.
pub struct HttpChatGateway {
    client: ApiClient,
}

impl HttpChatGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn stream_chat(
        &self,
        prompt: &ChatPrompt,
        cancel: CancellationToken,
    ) -> Result<StreamHandle, GatewayError> {
        let body = ChatRequestBody {
            message: prompt.message.clone(),
            scenario: prompt.scenario.wire_name().to_string(),
            conversation_id: prompt.conversation_id.clone(),
            knowledge_base_id: prompt.knowledge_base_id.clone(),
        };

        let response = self.client.chat_stream(&body).await.map_err(GatewayError::from)?;

        let (tx, rx) = mpsc::channel::<StreamItem>(32);
        tokio::spawn(read_stream(response, tx, cancel));
        Ok(StreamHandle::new(rx))
    }

    async fn history(
        &self,
        scenario: Scenario,
        knowledge_base_id: Option<&str>,
    ) -> Result<Vec<ConversationGroup>, GatewayError> {
        let response = self
            .client
            .history(scenario.wire_name(), knowledge_base_id)
            .await?;
        Ok(response.groups)
    }

    async fn conversation_messages(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<Message>, GatewayError> {
        let response = self.client.conversation_messages(conversation_id).await?;
        Ok(response.messages)
    }

    async fn create_conversation(
        &self,
        scenario: Scenario,
        knowledge_base_id: Option<&str>,
    ) -> Result<Conversation, GatewayError> {
        let response = self
            .client
            .create_conversation(scenario.wire_name(), knowledge_base_id)
            .await?;
        Ok(response.into())
    }

    async fn rename_conversation(
        &self,
        conversation_id: &str,
        title: &str,
    ) -> Result<(), GatewayError> {
        self.client
            .rename_conversation(conversation_id, title)
            .await
            .map_err(GatewayError::from)
    }

    async fn delete_conversation(&self, conversation_id: &str) -> Result<(), GatewayError> {
        self.client
            .delete_conversation(conversation_id)
            .await
            .map_err(GatewayError::from)
    }

    async fn knowledge_bases(&self) -> Result<Vec<KnowledgeBase>, GatewayError> {
        let summaries = self.client.knowledge_bases().await?;
        Ok(summaries.into_iter().map(Into::into).collect())
    }
}

/// Background reader: body chunks → SSE parser → event channel.
async fn read_stream(
    response: reqwest::Response,
    tx: mpsc::Sender<StreamItem>,
    cancel: CancellationToken,
) {
    let mut body = response.bytes_stream();
    let mut decoder = Utf8Accumulator::default();
    let mut parser = SseParser::new();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                // Dropping the body aborts the request; nothing further
                // is forwarded.
                debug!("Reply stream abandoned by cancellation");
                return;
            }
            chunk = body.next() => match chunk {
                Some(Ok(bytes)) => {
                    let text = decoder.push(&bytes);
                    for event in parser.feed(&text) {
                        let terminal = event.is_terminal();
                        if tx.send(Ok(event)).await.is_err() {
                            // Receiver dropped — reply superseded.
                            return;
                        }
                        if terminal {
                            return;
                        }
                    }
                }
                Some(Err(e)) => {
                    let _ = tx
                        .send(Err(GatewayError::RequestFailed(e.to_string())))
                        .await;
                    return;
                }
                None => {
                    for event in parser.finish() {
                        if tx.send(Ok(event)).await.is_err() {
                            return;
                        }
                    }
                    return;
                }
            }
        }
    }
}

//! Send Message use case.
//!
//! Sends one chat message and assembles the streamed reply. Events from
//! the gateway are folded into a [`ReplyAssembly`]; every snapshot is
//! forwarded to the [`ReplyObserver`] for incremental rendering.
//!
//! Cancellation is cooperative: the caller's [`CancellationToken`] is
//! checked between events, and once it fires no further events are
//! folded and no terminal callback is emitted — the outcome is
//! [`ReplyOutcome::Aborted`], which is not an error. A transport failure
//! mid-stream is an error; the presentation layer shows a single
//! fallback message for it.

use crate::ports::chat_gateway::{ChatGateway, ChatPrompt, GatewayError};
use crate::ports::reply_observer::ReplyObserver;
use ragchat_domain::{FinalReply, ReplyAssembly};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur while sending a message.
#[derive(Error, Debug)]
pub enum SendMessageError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// How a chat request ended.
#[derive(Debug)]
pub enum ReplyOutcome {
    /// The stream finished; the reply and terminal metadata are final.
    Completed(FinalReply),
    /// The request was abandoned (superseded or interrupted by the user).
    /// Not user-visible as an error.
    Aborted,
}

impl ReplyOutcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, ReplyOutcome::Aborted)
    }
}

/// Use case for sending a chat message and assembling the streamed reply.
pub struct SendMessageUseCase {
    gateway: Arc<dyn ChatGateway>,
}

impl SendMessageUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    /// Execute the request and fold the reply stream.
    pub async fn execute(
        &self,
        prompt: ChatPrompt,
        cancel: CancellationToken,
        observer: &dyn ReplyObserver,
    ) -> Result<ReplyOutcome, SendMessageError> {
        if cancel.is_cancelled() {
            return Ok(ReplyOutcome::Aborted);
        }

        info!(scenario = prompt.scenario.wire_name(), "Sending chat message");

        let mut handle = self.gateway.stream_chat(&prompt, cancel.clone()).await?;
        let mut assembly = ReplyAssembly::new();

        loop {
            tokio::select! {
                // Cancellation wins over a ready event: once the request
                // is abandoned nothing further may be folded.
                biased;
                _ = cancel.cancelled() => {
                    debug!("Chat request cancelled mid-stream");
                    return Ok(ReplyOutcome::Aborted);
                }
                item = handle.receiver.recv() => match item {
                    Some(Ok(event)) => {
                        let terminal = event.is_terminal();
                        if let Some(snapshot) = assembly.apply(event) {
                            observer.on_snapshot(&snapshot.text, snapshot.is_final);
                        }
                        if terminal {
                            break;
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    // Natural end-of-input without an explicit [DONE].
                    None => break,
                }
            }
        }

        if !assembly.is_finished() {
            assembly.finish();
            observer.on_snapshot(assembly.text(), true);
        }

        let reply = assembly.into_final();
        debug!(
            chars = reply.text.len(),
            new_conversation = reply.new_conversation_id.is_some(),
            "Reply assembled"
        );
        Ok(ReplyOutcome::Completed(reply))
    }
}

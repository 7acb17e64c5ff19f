//! Reply assembly — folding stream events into the assistant's reply.
//!
//! [`ReplyAssembly`] is owned by exactly one in-flight chat request and
//! discarded when that request completes, fails, or is superseded. It
//! accumulates token fragments, honors authoritative `full_response`
//! overwrites, and records terminal metadata (new conversation id,
//! server-generated title).
//!
//! After each folded event the assembly yields a [`ReplySnapshot`] so the
//! caller can re-render incrementally. A `full_response` arriving without
//! any preceding tokens produces a single overwrite snapshot — no
//! synthetic intermediate steps.

use crate::chat::stream::StreamEvent;

/// A render-ready view of the reply after folding one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplySnapshot {
    /// The accumulated reply text so far.
    pub text: String,
    /// True once the stream has logically finished.
    pub is_final: bool,
}

/// Terminal result of a completed assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalReply {
    /// The final reply text. If the server sent a `full_response` this is
    /// that value, otherwise the token concatenation.
    pub text: String,
    /// Conversation id created by the server for this exchange, if any.
    /// The caller should switch its active conversation to it.
    pub new_conversation_id: Option<String>,
    /// Server-generated title, if any.
    pub title: Option<String>,
}

/// Accumulated state of one in-flight assistant reply.
#[derive(Debug, Default)]
pub struct ReplyAssembly {
    text: String,
    /// Set when a `full_response` has replaced the token concatenation.
    overwritten: bool,
    new_conversation_id: Option<String>,
    title: Option<String>,
    finished: bool,
}

impl ReplyAssembly {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated reply text so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True once `Done` has been folded or [`finish`](Self::finish) called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True if the server replaced the token concatenation wholesale.
    pub fn was_overwritten(&self) -> bool {
        self.overwritten
    }

    /// Fold one event into the assembly.
    ///
    /// Returns a snapshot when the event changed the renderable text or
    /// ended the stream; metadata-only events return `None` so callers
    /// do not re-render for them.
    pub fn apply(&mut self, event: StreamEvent) -> Option<ReplySnapshot> {
        if self.finished {
            return None;
        }
        match event {
            StreamEvent::Token(fragment) => {
                self.text.push_str(&fragment);
                Some(self.snapshot())
            }
            StreamEvent::FullResponse(full) => {
                self.text = full;
                self.overwritten = true;
                Some(self.snapshot())
            }
            StreamEvent::NewConversation(id) => {
                // A later occurrence overwrites an earlier one.
                self.new_conversation_id = Some(id);
                None
            }
            StreamEvent::Title(title) => {
                self.title = Some(title);
                None
            }
            StreamEvent::Done => {
                self.finished = true;
                Some(self.snapshot())
            }
        }
    }

    /// Mark the assembly terminal at natural end-of-input (the stream may
    /// end without an explicit `[DONE]` record).
    pub fn finish(&mut self) {
        self.finished = true;
    }

    fn snapshot(&self) -> ReplySnapshot {
        ReplySnapshot {
            text: self.text.clone(),
            is_final: self.finished,
        }
    }

    /// Consume the assembly into its terminal result.
    pub fn into_final(self) -> FinalReply {
        FinalReply {
            text: self.text,
            new_conversation_id: self.new_conversation_id,
            title: self.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(events: Vec<StreamEvent>) -> (Vec<ReplySnapshot>, FinalReply) {
        let mut assembly = ReplyAssembly::new();
        let mut snapshots = Vec::new();
        for event in events {
            if let Some(s) = assembly.apply(event) {
                snapshots.push(s);
            }
        }
        assembly.finish();
        (snapshots, assembly.into_final())
    }

    #[test]
    fn tokens_append_in_order() {
        let (snapshots, reply) = fold(vec![
            StreamEvent::Token("ab".to_string()),
            StreamEvent::Token("cd".to_string()),
        ]);
        assert_eq!(
            snapshots.iter().map(|s| s.text.as_str()).collect::<Vec<_>>(),
            vec!["ab", "abcd"]
        );
        assert_eq!(reply.text, "abcd");
    }

    #[test]
    fn full_response_replaces_token_concatenation() {
        let (snapshots, reply) = fold(vec![
            StreamEvent::Token("ab".to_string()),
            StreamEvent::Token("cd".to_string()),
            StreamEvent::FullResponse("ABCD".to_string()),
        ]);
        assert_eq!(snapshots.last().unwrap().text, "ABCD");
        assert_eq!(reply.text, "ABCD");
    }

    #[test]
    fn full_response_without_tokens_is_single_overwrite() {
        let (snapshots, reply) = fold(vec![StreamEvent::FullResponse("whole".to_string())]);
        assert_eq!(snapshots.len(), 1);
        assert_eq!(reply.text, "whole");
    }

    #[test]
    fn metadata_events_yield_no_snapshot() {
        let mut assembly = ReplyAssembly::new();
        assert!(assembly
            .apply(StreamEvent::NewConversation("c-9".to_string()))
            .is_none());
        assert!(assembly.apply(StreamEvent::Title("Backups".to_string())).is_none());
        let reply = assembly.into_final();
        assert_eq!(reply.new_conversation_id.as_deref(), Some("c-9"));
        assert_eq!(reply.title.as_deref(), Some("Backups"));
    }

    #[test]
    fn later_metadata_overwrites_earlier() {
        let mut assembly = ReplyAssembly::new();
        assembly.apply(StreamEvent::Title("first".to_string()));
        assembly.apply(StreamEvent::Title("second".to_string()));
        assert_eq!(assembly.into_final().title.as_deref(), Some("second"));
    }

    #[test]
    fn done_produces_final_snapshot_and_seals_assembly() {
        let mut assembly = ReplyAssembly::new();
        assembly.apply(StreamEvent::Token("hi".to_string()));
        let done = assembly.apply(StreamEvent::Done).unwrap();
        assert!(done.is_final);
        assert_eq!(done.text, "hi");
        // Events after Done are ignored
        assert!(assembly.apply(StreamEvent::Token("late".to_string())).is_none());
        assert_eq!(assembly.text(), "hi");
    }

    #[test]
    fn empty_stream_is_a_valid_terminal_state() {
        let (snapshots, reply) = fold(vec![]);
        assert!(snapshots.is_empty());
        assert_eq!(reply.text, "");
        assert!(reply.new_conversation_id.is_none());
    }
}

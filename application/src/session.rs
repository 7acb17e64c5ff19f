//! Chat session state.
//!
//! [`ChatSession`] replaces the ambient globals of a typical chat UI
//! (current scenario, current conversation, in-flight request) with one
//! explicit object. The last-request-wins rule is encoded in
//! [`begin_request`](ChatSession::begin_request): starting a new request
//! cancels and replaces the previous request's token, so at most one
//! reply assembly is ever active.

use ragchat_domain::Scenario;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// State of one interactive chat session.
#[derive(Debug, Default)]
pub struct ChatSession {
    scenario: Scenario,
    conversation_id: Option<String>,
    knowledge_base_id: Option<String>,
    active_request: Option<CancellationToken>,
}

impl ChatSession {
    pub fn new(scenario: Scenario, knowledge_base_id: Option<String>) -> Self {
        Self {
            scenario,
            conversation_id: None,
            knowledge_base_id,
            active_request: None,
        }
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn knowledge_base_id(&self) -> Option<&str> {
        self.knowledge_base_id.as_deref()
    }

    /// Begin a new chat request: abandon any in-flight request and hand
    /// out a fresh token for the new one.
    pub fn begin_request(&mut self) -> CancellationToken {
        self.cancel_active();
        let token = CancellationToken::new();
        self.active_request = Some(token.clone());
        token
    }

    /// Cancel the in-flight request, if any.
    pub fn cancel_active(&mut self) {
        if let Some(token) = self.active_request.take() {
            debug!("Cancelling in-flight chat request");
            token.cancel();
        }
    }

    /// Whether a request is currently streaming.
    pub fn is_processing(&self) -> bool {
        self.active_request
            .as_ref()
            .is_some_and(|t| !t.is_cancelled())
    }

    /// Mark the in-flight request finished (completed or failed).
    pub fn end_request(&mut self) {
        self.active_request = None;
    }

    /// Switch scenario: cancels any in-flight request and resets the
    /// conversation context, since conversations are scoped per scenario.
    pub fn switch_scenario(&mut self, scenario: Scenario) {
        self.cancel_active();
        self.scenario = scenario;
        self.conversation_id = None;
    }

    /// Open an existing conversation, abandoning any in-flight request.
    pub fn open_conversation(&mut self, conversation_id: impl Into<String>) {
        self.cancel_active();
        self.conversation_id = Some(conversation_id.into());
    }

    /// Start over with no active conversation.
    pub fn clear_conversation(&mut self) {
        self.cancel_active();
        self.conversation_id = None;
    }

    /// Adopt a server-created conversation id after a completed reply.
    pub fn adopt_conversation(&mut self, conversation_id: impl Into<String>) {
        self.conversation_id = Some(conversation_id.into());
    }

    /// Select (or clear) the knowledge base grounding future requests.
    pub fn select_knowledge_base(&mut self, knowledge_base_id: Option<String>) {
        self.knowledge_base_id = knowledge_base_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_request_cancels_previous_token() {
        let mut session = ChatSession::default();
        let first = session.begin_request();
        assert!(!first.is_cancelled());

        let second = session.begin_request();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[test]
    fn switch_scenario_cancels_and_resets_conversation() {
        let mut session = ChatSession::new(Scenario::ProductManual, None);
        session.open_conversation("c-1");
        let token = session.begin_request();

        session.switch_scenario(Scenario::OpsAssistant);
        assert!(token.is_cancelled());
        assert_eq!(session.scenario(), Scenario::OpsAssistant);
        assert!(session.conversation_id().is_none());
    }

    #[test]
    fn open_conversation_abandons_inflight_request() {
        let mut session = ChatSession::default();
        let token = session.begin_request();
        session.open_conversation("c-2");
        assert!(token.is_cancelled());
        assert_eq!(session.conversation_id(), Some("c-2"));
    }

    #[test]
    fn is_processing_tracks_request_lifecycle() {
        let mut session = ChatSession::default();
        assert!(!session.is_processing());
        let _token = session.begin_request();
        assert!(session.is_processing());
        session.end_request();
        assert!(!session.is_processing());
    }

    #[test]
    fn adopt_conversation_keeps_request_active() {
        let mut session = ChatSession::default();
        let token = session.begin_request();
        session.adopt_conversation("c-3");
        assert!(!token.is_cancelled());
        assert_eq!(session.conversation_id(), Some("c-3"));
    }
}

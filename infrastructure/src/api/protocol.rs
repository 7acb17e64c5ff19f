//! Wire types for the chat server's REST API.
//!
//! Request bodies and response envelopes, kept separate from the domain
//! entities so server-side field names can change without leaking into
//! the rest of the client.

use ragchat_domain::{Conversation, ConversationGroup, KnowledgeBase, Message};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequestBody {
    pub message: String,
    pub scenario: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base_id: Option<String>,
}

/// Envelope of `GET /api/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub groups: Vec<ConversationGroup>,
}

/// Envelope of `GET /api/conversation/{id}`.
#[derive(Debug, Deserialize)]
pub struct ConversationMessagesResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Response of `POST /api/conversation/new`.
#[derive(Debug, Deserialize)]
pub struct NewConversationResponse {
    pub conversation_id: String,
    pub title: String,
}

impl From<NewConversationResponse> for Conversation {
    fn from(r: NewConversationResponse) -> Self {
        Conversation {
            id: r.conversation_id,
            title: r.title,
        }
    }
}

/// Body of `POST /api/conversation/{id}/rename`.
#[derive(Debug, Serialize)]
pub struct RenameRequestBody {
    pub title: String,
}

/// One entry of `GET /api/knowledge-bases/`.
#[derive(Debug, Deserialize)]
pub struct KnowledgeBaseSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_count: u64,
}

impl From<KnowledgeBaseSummary> for KnowledgeBase {
    fn from(s: KnowledgeBaseSummary) -> Self {
        KnowledgeBase {
            id: s.id,
            name: s.name,
            description: s.description.filter(|d| !d.is_empty()),
            document_count: s.file_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragchat_domain::Role;

    #[test]
    fn chat_request_omits_absent_optional_fields() {
        let body = ChatRequestBody {
            message: "hi".to_string(),
            scenario: "product_manual".to_string(),
            conversation_id: None,
            knowledge_base_id: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("conversation_id"));
        assert!(!json.contains("knowledge_base_id"));
    }

    #[test]
    fn history_response_deserializes_groups() {
        let json = r#"{"groups":[{"time_group":"Today","conversations":[{"id":"c-1","title":"Backups"}]}]}"#;
        let parsed: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.groups.len(), 1);
        assert_eq!(parsed.groups[0].time_group, "Today");
        assert_eq!(parsed.groups[0].conversations[0].id, "c-1");
    }

    #[test]
    fn conversation_messages_deserialize_roles() {
        let json = r#"{"messages":[{"role":"user","content":"q"},{"role":"assistant","content":"a"}]}"#;
        let parsed: ConversationMessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.messages[0].role, Role::User);
        assert_eq!(parsed.messages[1].role, Role::Assistant);
    }

    #[test]
    fn knowledge_base_summary_maps_to_domain() {
        let json = r#"{"id":"kb-1","name":"Manuals","description":"","file_count":7,"collection_name":"x"}"#;
        let summary: KnowledgeBaseSummary = serde_json::from_str(json).unwrap();
        let kb = KnowledgeBase::from(summary);
        assert_eq!(kb.document_count, 7);
        // Empty descriptions collapse to None
        assert!(kb.description.is_none());
    }
}

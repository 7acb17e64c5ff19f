//! Knowledge base domain.
//!
//! The server owns knowledge-base content and indexing; the client only
//! lists the available bases and attaches a selected id to chat requests
//! so the server can ground its answers.

use serde::{Deserialize, Serialize};

/// A knowledge base available for retrieval grounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Number of documents indexed into this base.
    #[serde(default)]
    pub document_count: u64,
}

impl std::fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} docs)", self.name, self.document_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let kb: KnowledgeBase =
            serde_json::from_str(r#"{"id":"kb-1","name":"Manuals"}"#).unwrap();
        assert_eq!(kb.id, "kb-1");
        assert!(kb.description.is_none());
        assert_eq!(kb.document_count, 0);
    }

    #[test]
    fn display_includes_document_count() {
        let kb = KnowledgeBase {
            id: "kb-1".to_string(),
            name: "Manuals".to_string(),
            description: None,
            document_count: 12,
        };
        assert_eq!(kb.to_string(), "Manuals (12 docs)");
    }
}

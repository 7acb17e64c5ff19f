//! Export Test Cases use case.
//!
//! Fetches the latest assistant reply of a conversation, extracts the
//! generated test-case table, and serializes it to CSV. The caller
//! decides where the file lands; this use case only produces the content
//! and a suggested file name.

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use ragchat_domain::{extract_table, table_to_csv, DomainError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during test-case export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Conversation has no assistant messages")]
    NoAssistantMessage,

    #[error("No table found in the latest reply")]
    NoTable,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A ready-to-write CSV export.
#[derive(Debug, Clone)]
pub struct TestCaseExport {
    /// Suggested file name (`testcases_<conversation>.csv`).
    pub file_name: String,
    pub csv: String,
    /// Number of table rows, header included.
    pub rows: usize,
}

/// Use case for exporting generated test cases as CSV.
pub struct ExportTestCasesUseCase {
    gateway: Arc<dyn ChatGateway>,
}

impl ExportTestCasesUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, conversation_id: &str) -> Result<TestCaseExport, ExportError> {
        let message = self
            .gateway
            .latest_assistant_message(conversation_id)
            .await?
            .ok_or(ExportError::NoAssistantMessage)?;

        let table = extract_table(&message).ok_or(ExportError::NoTable)?;
        let csv = table_to_csv(&table)?;

        info!(conversation_id, rows = table.len(), "Exported test cases");

        Ok(TestCaseExport {
            file_name: format!("testcases_{conversation_id}.csv"),
            csv,
            rows: table.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::{ChatPrompt, StreamHandle};
    use async_trait::async_trait;
    use ragchat_domain::{
        Conversation, ConversationGroup, KnowledgeBase, Message, Scenario,
    };
    use tokio_util::sync::CancellationToken;

    struct FixedMessagesGateway {
        messages: Vec<Message>,
    }

    #[async_trait]
    impl ChatGateway for FixedMessagesGateway {
        async fn stream_chat(
            &self,
            _prompt: &ChatPrompt,
            _cancel: CancellationToken,
        ) -> Result<StreamHandle, GatewayError> {
            Err(GatewayError::TransportClosed)
        }

        async fn history(
            &self,
            _scenario: Scenario,
            _knowledge_base_id: Option<&str>,
        ) -> Result<Vec<ConversationGroup>, GatewayError> {
            Ok(Vec::new())
        }

        async fn conversation_messages(
            &self,
            _conversation_id: &str,
        ) -> Result<Vec<Message>, GatewayError> {
            Ok(self.messages.clone())
        }

        async fn create_conversation(
            &self,
            _scenario: Scenario,
            _knowledge_base_id: Option<&str>,
        ) -> Result<Conversation, GatewayError> {
            Err(GatewayError::TransportClosed)
        }

        async fn rename_conversation(
            &self,
            _conversation_id: &str,
            _title: &str,
        ) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn delete_conversation(&self, _conversation_id: &str) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn knowledge_bases(&self) -> Result<Vec<KnowledgeBase>, GatewayError> {
            Ok(Vec::new())
        }
    }

    const TABLE_REPLY: &str = "\
| ID | Step |
| --- | --- |
| TC-1 | Log in |
| TC-2 | Log out |";

    #[tokio::test]
    async fn exports_table_from_latest_assistant_message() {
        let gateway = Arc::new(FixedMessagesGateway {
            messages: vec![
                Message::user("generate test cases"),
                Message::assistant("old reply, no table"),
                Message::user("again please"),
                Message::assistant(TABLE_REPLY),
            ],
        });
        let export = ExportTestCasesUseCase::new(gateway)
            .execute("c-7")
            .await
            .unwrap();

        assert_eq!(export.file_name, "testcases_c-7.csv");
        assert_eq!(export.rows, 3);
        assert!(export.csv.starts_with("ID,Step\n"));
    }

    #[tokio::test]
    async fn missing_assistant_message_is_an_error() {
        let gateway = Arc::new(FixedMessagesGateway {
            messages: vec![Message::user("hello?")],
        });
        let err = ExportTestCasesUseCase::new(gateway)
            .execute("c-8")
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::NoAssistantMessage));
    }

    #[tokio::test]
    async fn reply_without_table_is_an_error() {
        let gateway = Arc::new(FixedMessagesGateway {
            messages: vec![Message::assistant("prose only")],
        });
        let err = ExportTestCasesUseCase::new(gateway)
            .execute("c-9")
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::NoTable));
    }
}

//! Chat domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role of a message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A stored conversation (Entity)
///
/// The server owns conversation state; the client only keeps the id and
/// title needed to reference and display it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
}

/// A group of conversations under a server-assigned time bucket
/// ("Today", "Last 7 days", ...). The grouping is produced server-side
/// and rendered verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationGroup {
    pub time_group: String,
    pub conversations: Vec<Conversation>,
}

/// Assistant scenario selecting the server-side prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Product documentation Q&A.
    ProductManual,
    /// Server operations and troubleshooting.
    OpsAssistant,
    /// Requirements analysis and elicitation.
    RequirementMining,
    /// Test-case generation; replies may carry an exportable table.
    TestCaseGeneration,
}

impl Scenario {
    /// The identifier sent to the server.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::ProductManual => "product_manual",
            Self::OpsAssistant => "ops_assistant",
            Self::RequirementMining => "requirement_mining",
            Self::TestCaseGeneration => "test_case_generation",
        }
    }

    /// Human-readable label for display purposes.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductManual => "Product Manual",
            Self::OpsAssistant => "Ops Assistant",
            Self::RequirementMining => "Requirement Mining",
            Self::TestCaseGeneration => "Test Case Generation",
        }
    }

    /// Whether replies in this scenario may contain exportable test-case
    /// tables.
    pub fn supports_export(&self) -> bool {
        matches!(self, Self::TestCaseGeneration)
    }

    /// All known scenarios, in display order.
    pub fn all() -> &'static [Scenario] {
        &[
            Self::ProductManual,
            Self::OpsAssistant,
            Self::RequirementMining,
            Self::TestCaseGeneration,
        ]
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::ProductManual
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Scenario {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "product_manual" | "manual" | "product" => Ok(Self::ProductManual),
            "ops_assistant" | "ops" => Ok(Self::OpsAssistant),
            "requirement_mining" | "requirements" => Ok(Self::RequirementMining),
            "test_case_generation" | "testcases" | "tests" => Ok(Self::TestCaseGeneration),
            other => Err(DomainError::UnknownScenario(other.to_string())),
        }
    }
}

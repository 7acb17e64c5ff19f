//! Configuration file schema.

use serde::{Deserialize, Serialize};

/// Root configuration (`ragchat.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub chat: FileChatConfig,
    pub repl: FileReplConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Base URL of the chat server.
    pub base_url: String,
    /// Connection establishment timeout in seconds. Streamed replies are
    /// bounded by cancellation, not by an overall request timeout.
    pub timeout_secs: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// `[chat]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Scenario used when none is given on the command line.
    pub default_scenario: String,
    /// Knowledge base preselected for new sessions.
    pub default_knowledge_base: Option<String>,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            default_scenario: "product_manual".to_string(),
            default_knowledge_base: None,
        }
    }
}

/// `[repl]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Print the welcome banner when the REPL starts.
    pub show_banner: bool,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self { show_banner: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = FileConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.timeout_secs, 10);
        assert_eq!(config.chat.default_scenario, "product_manual");
        assert!(config.repl.show_banner);
    }

    #[test]
    fn partial_toml_fills_missing_sections_with_defaults() {
        let config: FileConfig =
            toml::from_str("[server]\nbase_url = \"https://chat.example.com\"\n").unwrap();
        assert_eq!(config.server.base_url, "https://chat.example.com");
        assert_eq!(config.chat.default_scenario, "product_manual");
    }
}

//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for ragchat
#[derive(Parser, Debug)]
#[command(name = "ragchat")]
#[command(author, version, about = "Terminal client for the RAG chat assistant")]
#[command(long_about = r#"
ragchat talks to a retrieval-augmented chat server: it streams assistant
replies token by token, browses conversation history, selects knowledge
bases for grounding, and exports generated test-case tables to CSV.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./ragchat.toml      Project-level config
3. ~/.config/ragchat/config.toml   Global config

Example:
  ragchat "How do I configure a backup policy?"
  ragchat --scenario testcases --kb kb-42 "Generate test cases for login"
  ragchat --chat
  ragchat --export c-1a2b3c
"#)]
pub struct Cli {
    /// The message to send (not required in chat mode)
    pub message: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Scenario (product_manual, ops_assistant, requirement_mining,
    /// test_case_generation)
    #[arg(short, long, value_name = "SCENARIO")]
    pub scenario: Option<String>,

    /// Knowledge base id for retrieval grounding
    #[arg(long, value_name = "ID")]
    pub kb: Option<String>,

    /// Continue an existing conversation
    #[arg(long, value_name = "ID")]
    pub conversation: Option<String>,

    /// Chat server base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Export the latest test-case table of a conversation as CSV and exit
    #[arg(long, value_name = "CONVERSATION_ID")]
    pub export: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress banners and hints
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

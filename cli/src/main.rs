//! CLI entrypoint for ragchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Context, Result};
use clap::Parser;
use ragchat_application::{ChatPrompt, ChatSession, ExportTestCasesUseCase, ReplyOutcome, SendMessageUseCase};
use ragchat_domain::Scenario;
use ragchat_infrastructure::{ApiClient, ConfigLoader, FileConfig, HttpChatGateway};
use ragchat_presentation::{ChatRepl, Cli, ConsoleFormatter, StreamPrinter};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let base_url = cli
        .server
        .unwrap_or_else(|| config.server.base_url.clone());

    let scenario_name = cli
        .scenario
        .as_deref()
        .unwrap_or(&config.chat.default_scenario);
    let scenario: Scenario = match scenario_name.parse() {
        Ok(s) => s,
        Err(_) => bail!(
            "Unknown scenario '{}'. Options: {}",
            scenario_name,
            Scenario::all()
                .iter()
                .map(|s| s.wire_name())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };

    let knowledge_base_id = cli.kb.or(config.chat.default_knowledge_base);

    info!(server = %base_url, scenario = scenario.wire_name(), "Starting ragchat");

    // === Dependency Injection ===
    // Create the infrastructure adapter (HTTP gateway)
    let client = ApiClient::with_connect_timeout(
        &base_url,
        std::time::Duration::from_secs(config.server.timeout_secs),
    )?;
    let gateway = Arc::new(HttpChatGateway::new(client));

    // Export mode: fetch, extract and write the CSV, then exit
    if let Some(conversation_id) = cli.export {
        let export = ExportTestCasesUseCase::new(gateway)
            .execute(&conversation_id)
            .await?;
        std::fs::write(&export.file_name, &export.csv)
            .with_context(|| format!("Failed to write {}", export.file_name))?;
        println!("Wrote {} ({} rows)", export.file_name, export.rows);
        return Ok(());
    }

    let mut session = ChatSession::new(scenario, knowledge_base_id);
    if let Some(conversation_id) = &cli.conversation {
        session.open_conversation(conversation_id);
    }

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(gateway, session)
            .with_banner(config.repl.show_banner && !cli.quiet)
            .with_quiet(cli.quiet);
        repl.run().await?;
        return Ok(());
    }

    // Single message mode - the message is required
    let message = match cli.message {
        Some(m) => m,
        None => bail!("A message is required. Use --chat for interactive mode."),
    };

    let cancel = session.begin_request();
    let prompt = ChatPrompt {
        message,
        scenario: session.scenario(),
        conversation_id: session.conversation_id().map(String::from),
        knowledge_base_id: session.knowledge_base_id().map(String::from),
    };
    let printer = if cli.quiet {
        StreamPrinter::without_spinner()
    } else {
        StreamPrinter::new()
    };

    let use_case = SendMessageUseCase::new(gateway);
    let result = tokio::select! {
        result = use_case.execute(prompt, cancel.clone(), &printer) => result,
        _ = ctrl_c(cancel.clone()) => Ok(ReplyOutcome::Aborted),
    };

    match result {
        Ok(ReplyOutcome::Completed(reply)) => {
            if !cli.quiet {
                if let Some(id) = &reply.new_conversation_id {
                    eprintln!("Conversation: {} (use --conversation {} to continue)", id, id);
                }
            }
            Ok(())
        }
        Ok(ReplyOutcome::Aborted) => {
            eprintln!("(request cancelled)");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Chat request failed");
            eprintln!("{}", ConsoleFormatter::fallback_error());
            std::process::exit(1);
        }
    }
}

/// Wait for Ctrl-C, then cancel the in-flight request.
async fn ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        cancel.cancel();
        eprintln!();
    }
}

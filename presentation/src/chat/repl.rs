//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::progress::printer::StreamPrinter;
use colored::Colorize;
use ragchat_application::{
    ChatGateway, ChatPrompt, ChatSession, ExportTestCasesUseCase, ReplyOutcome,
    SendMessageUseCase,
};
use ragchat_domain::{Conversation, KnowledgeBase, Scenario};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::warn;

/// Interactive chat REPL
pub struct ChatRepl {
    gateway: Arc<dyn ChatGateway>,
    send_message: SendMessageUseCase,
    export: ExportTestCasesUseCase,
    session: ChatSession,
    show_banner: bool,
    quiet: bool,
    /// Flattened history list backing `/open <n>`.
    conversation_index: Vec<Conversation>,
    /// Knowledge base list backing `/kb <n>`.
    knowledge_index: Vec<KnowledgeBase>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(gateway: Arc<dyn ChatGateway>, session: ChatSession) -> Self {
        Self {
            send_message: SendMessageUseCase::new(Arc::clone(&gateway)),
            export: ExportTestCasesUseCase::new(Arc::clone(&gateway)),
            gateway,
            session,
            show_banner: true,
            quiet: false,
            conversation_index: Vec::new(),
            knowledge_index: Vec::new(),
        }
    }

    /// Set whether to print the welcome banner
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Set quiet mode (no spinner, no hints)
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load input history
        let history_path = dirs::data_dir().map(|p| p.join("ragchat").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        if self.show_banner {
            self.print_welcome();
        }

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.send(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              ragchat - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Scenario: {}", self.session.scenario());
        if let Some(kb) = self.session.knowledge_base_id() {
            println!("Knowledge base: {}", kb);
        }
        println!();
        println!("{}", scenario_welcome(self.session.scenario()));
        println!();
        println!("Commands:");
        println!("  /help       - Show all commands");
        println!("  /history    - List conversations");
        println!("  /quit       - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    async fn handle_command(&mut self, line: &str) -> bool {
        let (cmd, arg) = match line.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match cmd {
            "/quit" | "/exit" | "/q" => {
                self.session.cancel_active();
                println!("Bye!");
                return true;
            }
            "/help" | "/h" | "/?" => self.print_help(),
            "/history" => self.refresh_history(true).await,
            "/open" => self.open_conversation(arg).await,
            "/new" => self.new_conversation().await,
            "/rename" => self.rename_conversation(arg).await,
            "/delete" => self.delete_conversation().await,
            "/scenario" => self.switch_scenario(arg),
            "/kb" => self.select_knowledge_base(arg).await,
            "/export" => self.export_testcases().await,
            other => println!("Unknown command: {} (try /help)", other),
        }
        false
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?       - Show this help");
        println!("  /history            - List conversations for the current scenario");
        println!("  /open <n|id>        - Open a conversation and replay it");
        println!("  /new                - Start a fresh conversation");
        println!("  /rename <title>     - Rename the current conversation");
        println!("  /delete             - Delete the current conversation");
        println!("  /scenario <name>    - Switch scenario (product_manual, ops_assistant,");
        println!("                        requirement_mining, test_case_generation)");
        println!("  /kb [n|id|none]     - List or select a knowledge base");
        println!("  /export             - Export the latest test-case table as CSV");
        println!("  /quit, /exit, /q    - Exit chat");
        println!();
    }

    /// Send a chat message and stream the reply. Starting a new request
    /// abandons any previous in-flight one (last-request-wins); Ctrl-C
    /// while streaming cancels without leaving the REPL.
    async fn send(&mut self, message: &str) {
        let cancel = self.session.begin_request();
        let prompt = ChatPrompt {
            message: message.to_string(),
            scenario: self.session.scenario(),
            conversation_id: self.session.conversation_id().map(String::from),
            knowledge_base_id: self.session.knowledge_base_id().map(String::from),
        };

        let printer = if self.quiet {
            StreamPrinter::without_spinner()
        } else {
            StreamPrinter::new()
        };

        let result = tokio::select! {
            result = self.send_message.execute(prompt, cancel.clone(), &printer) => result,
            _ = tokio::signal::ctrl_c() => {
                cancel.cancel();
                println!();
                Ok(ReplyOutcome::Aborted)
            }
        };
        self.session.end_request();

        match result {
            Ok(ReplyOutcome::Completed(reply)) => {
                if let Some(id) = reply.new_conversation_id {
                    self.session.adopt_conversation(id);
                    if let Some(title) = &reply.title {
                        println!("{}", format!("── {} ──", title).dimmed());
                    }
                    // Keep /open indices in sync with the server
                    self.refresh_history(false).await;
                }
                if !self.quiet
                    && self.session.scenario().supports_export()
                    && ragchat_domain::extract_table(&reply.text).is_some()
                {
                    println!("{}", "Hint: /export saves this table as CSV".dimmed());
                }
            }
            Ok(ReplyOutcome::Aborted) => {
                println!("{}", "(request cancelled)".dimmed());
            }
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                println!("{}", ConsoleFormatter::fallback_error());
            }
        }
    }

    async fn refresh_history(&mut self, print: bool) {
        match self
            .gateway
            .history(self.session.scenario(), self.session.knowledge_base_id())
            .await
        {
            Ok(groups) => {
                self.conversation_index = groups
                    .iter()
                    .flat_map(|g| g.conversations.iter().cloned())
                    .collect();
                if print {
                    println!("{}", ConsoleFormatter::format_history(&groups));
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to load history");
                if print {
                    println!("Could not load history.");
                }
            }
        }
    }

    /// Resolve `/open` and `/kb` arguments: a small number indexes the
    /// last listed entries, anything else is taken as a raw id.
    fn resolve_conversation(&self, arg: &str) -> Option<String> {
        if let Ok(n) = arg.parse::<usize>() {
            return self
                .conversation_index
                .get(n.checked_sub(1)?)
                .map(|c| c.id.clone());
        }
        (!arg.is_empty()).then(|| arg.to_string())
    }

    async fn open_conversation(&mut self, arg: &str) {
        if self.conversation_index.is_empty() {
            self.refresh_history(false).await;
        }
        let Some(id) = self.resolve_conversation(arg) else {
            println!("Usage: /open <n|id> (see /history)");
            return;
        };

        match self.gateway.conversation_messages(&id).await {
            Ok(messages) => {
                self.session.open_conversation(&id);
                println!("{}", ConsoleFormatter::format_transcript(&messages));
            }
            Err(e) => {
                warn!(error = %e, conversation_id = %id, "Failed to open conversation");
                println!("Could not open conversation {}.", id);
            }
        }
    }

    async fn new_conversation(&mut self) {
        match self
            .gateway
            .create_conversation(self.session.scenario(), self.session.knowledge_base_id())
            .await
        {
            Ok(conversation) => {
                self.session.open_conversation(&conversation.id);
                println!("Started conversation: {}", conversation.title);
            }
            Err(e) => {
                warn!(error = %e, "Failed to create conversation");
                // The server also creates one lazily on the first message
                self.session.clear_conversation();
                println!("Starting fresh; the server will create a conversation on your first message.");
            }
        }
    }

    async fn rename_conversation(&mut self, title: &str) {
        let Some(id) = self.session.conversation_id().map(String::from) else {
            println!("No active conversation to rename.");
            return;
        };
        if title.is_empty() {
            println!("Usage: /rename <title>");
            return;
        }
        match self.gateway.rename_conversation(&id, title).await {
            Ok(()) => println!("Renamed to: {}", title),
            Err(e) => {
                warn!(error = %e, "Rename failed");
                println!("Could not rename conversation.");
            }
        }
    }

    async fn delete_conversation(&mut self) {
        let Some(id) = self.session.conversation_id().map(String::from) else {
            println!("No active conversation to delete.");
            return;
        };
        match self.gateway.delete_conversation(&id).await {
            Ok(()) => {
                self.session.clear_conversation();
                println!("Conversation deleted.");
            }
            Err(e) => {
                warn!(error = %e, "Delete failed");
                println!("Could not delete conversation.");
            }
        }
    }

    fn switch_scenario(&mut self, arg: &str) {
        match arg.parse::<Scenario>() {
            Ok(scenario) => {
                // Abandons any in-flight request and resets the
                // conversation context.
                self.session.switch_scenario(scenario);
                self.conversation_index.clear();
                println!("Scenario: {}", scenario);
                println!("{}", scenario_welcome(scenario));
            }
            Err(_) => {
                println!(
                    "Unknown scenario '{}'. Options: {}",
                    arg,
                    Scenario::all()
                        .iter()
                        .map(|s| s.wire_name())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }
    }

    async fn select_knowledge_base(&mut self, arg: &str) {
        if arg == "none" {
            self.session.select_knowledge_base(None);
            println!("Knowledge base cleared.");
            return;
        }

        match self.gateway.knowledge_bases().await {
            Ok(bases) => self.knowledge_index = bases,
            Err(e) => {
                warn!(error = %e, "Failed to list knowledge bases");
                println!("Could not load knowledge bases.");
                return;
            }
        }

        if arg.is_empty() {
            println!(
                "{}",
                ConsoleFormatter::format_knowledge_bases(
                    &self.knowledge_index,
                    self.session.knowledge_base_id(),
                )
            );
            return;
        }

        let selected = if let Ok(n) = arg.parse::<usize>() {
            n.checked_sub(1)
                .and_then(|i| self.knowledge_index.get(i))
                .map(|kb| kb.id.clone())
        } else {
            self.knowledge_index
                .iter()
                .find(|kb| kb.id == arg)
                .map(|kb| kb.id.clone())
        };

        match selected {
            Some(id) => {
                println!("Knowledge base: {}", id);
                self.session.select_knowledge_base(Some(id));
            }
            None => println!("No such knowledge base: {}", arg),
        }
    }

    async fn export_testcases(&mut self) {
        let Some(id) = self.session.conversation_id().map(String::from) else {
            println!("No active conversation to export from.");
            return;
        };
        match self.export.execute(&id).await {
            Ok(export) => match std::fs::write(&export.file_name, &export.csv) {
                Ok(()) => println!("Wrote {} ({} rows)", export.file_name, export.rows),
                Err(e) => println!("Could not write {}: {}", export.file_name, e),
            },
            Err(e) => println!("Export failed: {}", e),
        }
    }
}

/// Scenario-specific welcome blurb shown when entering a scenario.
fn scenario_welcome(scenario: Scenario) -> &'static str {
    match scenario {
        Scenario::ProductManual => {
            "I can answer questions about product features and operation guides.\n\
             Try: How do I configure a backup policy?"
        }
        Scenario::OpsAssistant => {
            "I can help with server operations, troubleshooting and tuning.\n\
             Try: What could cause a MySQL backup to fail?"
        }
        Scenario::RequirementMining => {
            "Describe your business context and I will help you structure the\n\
             system requirements. Try: How should an online payment system be specified?"
        }
        Scenario::TestCaseGeneration => {
            "Describe the feature under test and I will generate test cases,\n\
             exportable to CSV with /export."
        }
    }
}

//! Console output formatting

use colored::Colorize;
use ragchat_domain::{ConversationGroup, KnowledgeBase, Message, Role};

/// Formats domain data for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Conversation history grouped by server-side time buckets, with a
    /// running index usable by `/open <n>`.
    pub fn format_history(groups: &[ConversationGroup]) -> String {
        if groups.iter().all(|g| g.conversations.is_empty()) {
            return "No conversations yet.".dimmed().to_string();
        }

        let mut out = String::new();
        let mut index = 0usize;
        for group in groups {
            if group.conversations.is_empty() {
                continue;
            }
            out.push_str(&format!("{}\n", group.time_group.bold().cyan()));
            for conversation in &group.conversations {
                index += 1;
                out.push_str(&format!(
                    "  {:>3}. {}  {}\n",
                    index,
                    conversation.title,
                    format!("({})", conversation.id).dimmed()
                ));
            }
        }
        out
    }

    /// Knowledge base list with the active selection marked.
    pub fn format_knowledge_bases(bases: &[KnowledgeBase], selected: Option<&str>) -> String {
        if bases.is_empty() {
            return "No knowledge bases available.".dimmed().to_string();
        }

        let mut out = String::new();
        for (i, kb) in bases.iter().enumerate() {
            let marker = if selected == Some(kb.id.as_str()) {
                "*".green().to_string()
            } else {
                " ".to_string()
            };
            out.push_str(&format!("{} {:>2}. {}", marker, i + 1, kb));
            if let Some(description) = &kb.description {
                out.push_str(&format!("  {}", description.dimmed()));
            }
            out.push('\n');
        }
        out
    }

    /// A replayed conversation transcript.
    pub fn format_transcript(messages: &[Message]) -> String {
        let mut out = String::new();
        for message in messages {
            let speaker = match message.role {
                Role::User => "You".bold().blue(),
                Role::Assistant => "Assistant".bold().green(),
            };
            out.push_str(&format!("{}:\n{}\n\n", speaker, message.content));
        }
        out
    }

    /// The single fallback message shown for a failed (not aborted)
    /// request.
    pub fn fallback_error() -> String {
        "Something went wrong while processing your request. Please try again later."
            .red()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragchat_domain::Conversation;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn history_numbers_run_across_groups() {
        plain();
        let groups = vec![
            ConversationGroup {
                time_group: "Today".to_string(),
                conversations: vec![Conversation {
                    id: "c-1".to_string(),
                    title: "Backups".to_string(),
                }],
            },
            ConversationGroup {
                time_group: "Last 7 days".to_string(),
                conversations: vec![Conversation {
                    id: "c-2".to_string(),
                    title: "Login tests".to_string(),
                }],
            },
        ];
        let out = ConsoleFormatter::format_history(&groups);
        assert!(out.contains("1. Backups"));
        assert!(out.contains("2. Login tests"));
        assert!(out.contains("Last 7 days"));
    }

    #[test]
    fn empty_history_has_friendly_message() {
        plain();
        let out = ConsoleFormatter::format_history(&[]);
        assert!(out.contains("No conversations yet"));
    }

    #[test]
    fn knowledge_base_selection_is_marked() {
        plain();
        let bases = vec![
            KnowledgeBase {
                id: "kb-1".to_string(),
                name: "Manuals".to_string(),
                description: None,
                document_count: 3,
            },
            KnowledgeBase {
                id: "kb-2".to_string(),
                name: "Runbooks".to_string(),
                description: Some("ops".to_string()),
                document_count: 9,
            },
        ];
        let out = ConsoleFormatter::format_knowledge_bases(&bases, Some("kb-2"));
        let marked_line = out.lines().find(|l| l.contains("Runbooks")).unwrap();
        assert!(marked_line.starts_with('*'));
    }

    #[test]
    fn transcript_labels_both_roles() {
        plain();
        let out = ConsoleFormatter::format_transcript(&[
            Message::user("hello"),
            Message::assistant("hi there"),
        ]);
        assert!(out.contains("You:"));
        assert!(out.contains("Assistant:"));
        assert!(out.contains("hi there"));
    }
}

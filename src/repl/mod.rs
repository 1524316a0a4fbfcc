//! Interactive chat loop
//!
//! Thin presentation layer over the assistant: reads questions,
//! dispatches slash commands, renders answers, and keeps the session
//! history. Implements nothing of the pipeline itself.

use crate::assistant::Assistant;
use crate::errors::{AssistantError, Result};
use crate::session::{ChatResponse, SessionHistory};
use crate::tools::EMPTY_RESULT_MARKER;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Entries shown by the /history command
const HISTORY_WINDOW: usize = 8;

/// Parsed chat-loop input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// A question for the assistant
    Ask(String),
    /// List loaded documents
    Docs,
    /// Restrict questions to the named documents
    Select(Vec<String>),
    /// Clear the document restriction
    All,
    /// Generate and show a document summary
    Summary(String),
    /// Show recent exchanges
    History,
    /// Show command help
    Help,
    /// Leave the chat loop
    Quit,
    /// Blank input
    Empty,
}

/// Parse one line of chat input
pub fn parse_command(line: &str) -> ChatCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ChatCommand::Empty;
    }
    if !trimmed.starts_with('/') {
        return ChatCommand::Ask(trimmed.to_string());
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or("").trim();

    match command {
        "/docs" => ChatCommand::Docs,
        "/select" => ChatCommand::Select(
            rest.split_whitespace().map(|s| s.to_string()).collect(),
        ),
        "/all" => ChatCommand::All,
        "/summary" => ChatCommand::Summary(rest.to_string()),
        "/history" => ChatCommand::History,
        "/help" => ChatCommand::Help,
        "/quit" | "/exit" => ChatCommand::Quit,
        _ => ChatCommand::Help,
    }
}

/// Interactive session driver
pub struct ChatLoop {
    assistant: Assistant,
    history: SessionHistory,
    /// Empty means "all documents"
    selected: Vec<String>,
}

impl ChatLoop {
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant,
            history: SessionHistory::new(),
            selected: Vec::new(),
        }
    }

    /// Run until /quit or EOF
    pub async fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new()
            .map_err(|e| AssistantError::Generic(format!("readline init failed: {}", e)))?;

        self.print_banner();

        loop {
            match editor.readline("docbuddy> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    match parse_command(&line) {
                        ChatCommand::Ask(query) => self.handle_ask(&query).await,
                        ChatCommand::Docs => self.show_docs(),
                        ChatCommand::Select(docs) => self.handle_select(docs),
                        ChatCommand::All => {
                            self.selected.clear();
                            println!("{}", "Answering from all documents.".green());
                        }
                        ChatCommand::Summary(doc) => self.handle_summary(&doc).await,
                        ChatCommand::History => self.show_history(),
                        ChatCommand::Help => self.show_help(),
                        ChatCommand::Quit => break,
                        ChatCommand::Empty => {}
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    return Err(AssistantError::Generic(format!("readline failed: {}", e)));
                }
            }
        }

        println!("{}", "Goodbye.".dimmed());
        Ok(())
    }

    fn print_banner(&self) {
        println!("{}", "docbuddy - multi-agent document chat".bold());
        println!(
            "Model: {}  Executor: {}  Documents: {}",
            self.assistant.model_name().cyan(),
            self.assistant.strategy_name().cyan(),
            self.assistant.store().len().to_string().cyan()
        );
        println!(
            "Workflow: {}",
            self.assistant.registry().workflow_description().dimmed()
        );
        println!("{}", "Type a question, or /help for commands.".dimmed());
    }

    async fn handle_ask(&mut self, query: &str) {
        if self.selected.len() >= 2 {
            let results = self.assistant.execute_multi(query, &self.selected).await;
            for result in results.iter() {
                println!("\n{}", format!("== {} ==", result.document).bold());
                if result.failed {
                    println!("{}", result.answer.red());
                } else {
                    self.print_answer(&result.answer);
                }
            }
            self.history.record_multi(query, results);
            return;
        }

        let document = self.selected.first().map(|s| s.as_str());
        match self.assistant.ask(query, document).await {
            Ok((answer, agent_generated)) => {
                if !agent_generated {
                    println!("{}", "(direct answer - pipeline unavailable)".yellow());
                }
                self.print_answer(&answer);
                self.history.record_single(
                    query,
                    answer,
                    document.unwrap_or("All Documents"),
                    agent_generated,
                );
            }
            Err(e) => println!("{}", format!("Could not answer: {}", e).red()),
        }
    }

    fn print_answer(&self, answer: &str) {
        if answer == EMPTY_RESULT_MARKER {
            println!("{}", answer.yellow());
        } else {
            println!("{}", answer);
        }
    }

    fn handle_select(&mut self, docs: Vec<String>) {
        if docs.is_empty() {
            println!("{}", "Usage: /select <document> [<document>...]".dimmed());
            return;
        }
        let unknown: Vec<_> = docs
            .iter()
            .filter(|d| !self.assistant.store().contains(d))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            println!(
                "{}",
                format!("Unknown documents: {}", unknown.join(", ")).red()
            );
            return;
        }
        println!(
            "{}",
            format!("Answering from: {}", docs.join(", ")).green()
        );
        self.selected = docs;
    }

    async fn handle_summary(&mut self, document: &str) {
        if document.is_empty() {
            println!("{}", "Usage: /summary <document>".dimmed());
            return;
        }
        if let Some(existing) = self.history.summary(document) {
            println!(
                "{}",
                format!(
                    "Summary of {} (generated {} with {})",
                    document,
                    existing.generated_at.format("%Y-%m-%d %H:%M"),
                    existing.model
                )
                .bold()
            );
            println!("{}", existing.content);
            return;
        }
        match self.assistant.summarize_document(document).await {
            Ok(summary) => {
                println!("{}", format!("Summary of {}", document).bold());
                println!("{}", summary.content);
                self.history.set_summary(summary);
            }
            Err(e) => println!("{}", format!("Could not summarize: {}", e).red()),
        }
    }

    fn show_docs(&self) {
        for info in self.assistant.store().documents() {
            let marker = if self.selected.contains(&info.name) {
                "*"
            } else {
                " "
            };
            println!(
                "{} {} ({}, {} chunks)",
                marker, info.name, info.format, info.chunk_count
            );
        }
    }

    fn show_history(&self) {
        if self.history.is_empty() {
            println!("{}", "No exchanges yet.".dimmed());
            return;
        }
        for entry in self.history.recent(HISTORY_WINDOW) {
            let kind = if entry.agent_generated {
                "agent".green()
            } else {
                "fallback".yellow()
            };
            println!(
                "[{}] ({}) {} - {}",
                entry.timestamp.format("%H:%M:%S"),
                kind,
                entry.document,
                entry.query
            );
            if let ChatResponse::Multi(results) = &entry.response {
                for result in results.iter() {
                    let status = if result.failed { "failed".red() } else { "ok".green() };
                    println!("    {} {}", result.document, status);
                }
            }
        }
    }

    fn show_help(&self) {
        println!("Commands:");
        println!("  /docs               list loaded documents");
        println!("  /select <names...>  restrict questions to documents");
        println!("  /all                answer from all documents");
        println!("  /summary <name>     generate a document summary");
        println!("  /history            show recent exchanges");
        println!("  /quit               leave the chat");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text_is_a_question() {
        assert_eq!(
            parse_command("What is the main topic?"),
            ChatCommand::Ask("What is the main topic?".to_string())
        );
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_command("   "), ChatCommand::Empty);
    }

    #[test]
    fn test_parse_select_with_documents() {
        assert_eq!(
            parse_command("/select a.txt b.txt"),
            ChatCommand::Select(vec!["a.txt".to_string(), "b.txt".to_string()])
        );
    }

    #[test]
    fn test_parse_summary() {
        assert_eq!(
            parse_command("/summary bio.txt"),
            ChatCommand::Summary("bio.txt".to_string())
        );
    }

    #[test]
    fn test_parse_quit_aliases() {
        assert_eq!(parse_command("/quit"), ChatCommand::Quit);
        assert_eq!(parse_command("/exit"), ChatCommand::Quit);
    }

    #[test]
    fn test_parse_unknown_command_shows_help() {
        assert_eq!(parse_command("/bogus"), ChatCommand::Help);
    }
}

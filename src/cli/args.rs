//! Command-line argument parsing for docbuddy
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docbuddy - Ask questions about your documents with a multi-agent pipeline
#[derive(Parser, Debug)]
#[command(name = "docbuddy")]
#[command(version = "0.1.0")]
#[command(about = "Turn a folder of documents into a question-answering assistant", long_about = None)]
pub struct Args {
    /// Question to ask about the documents
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Directory of .txt/.md documents to load
    #[arg(short, long)]
    pub docs: Option<PathBuf>,

    /// Restrict the question to specific documents (repeatable)
    #[arg(long = "doc", value_name = "NAME")]
    pub documents: Vec<String>,

    /// Ollama model to use
    #[arg(short, long)]
    pub model: Option<String>,

    /// Ollama host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Ollama port
    #[arg(long, default_value_t = 11434)]
    pub port: u16,

    /// Retrieval chunk count (top-k)
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Force the sequential executor instead of the workflow graph
    #[arg(long)]
    pub sequential: bool,

    /// Verbosity level: default (normal), -v (verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except the answer)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start interactive chat mode
    Chat,

    /// Generate a standalone document summary
    Summarize {
        /// Document name to summarize
        document: Option<String>,

        /// Summarize every loaded document
        #[arg(long)]
        all: bool,
    },

    /// List available Ollama models
    Models,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose > 0 {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Check the argument combination is usable
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_none() && self.query.is_none() {
            return Err(
                "Question required. Use 'docbuddy --docs <DIR> \"<QUESTION>\"' or run a subcommand."
                    .to_string(),
            );
        }

        if self.command.is_some() && self.query.is_some() {
            return Err("Provide either a question or a subcommand, not both.".to_string());
        }

        let needs_docs = match &self.command {
            None => true,
            Some(Commands::Chat) => true,
            Some(Commands::Summarize { .. }) => true,
            Some(Commands::Models) | Some(Commands::Config) => false,
        };
        if needs_docs && self.docs.is_none() {
            return Err("Document directory required: pass --docs <DIR>.".to_string());
        }

        Ok(())
    }
}

//! docbuddy - Main CLI Entry Point

use anyhow::{anyhow, Result};
use clap::Parser;
use colored::Colorize;
use docbuddy::assistant::Assistant;
use docbuddy::cli::{Args, Commands, Verbosity};
use docbuddy::config::Config;
use docbuddy::documents::DocumentStore;
use docbuddy::generation::OllamaGenerator;
use docbuddy::pipeline::StrategyKind;
use docbuddy::repl::ChatLoop;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(msg) = args.validate() {
        eprintln!("{}", msg.red());
        std::process::exit(2);
    }

    let mut config = Config::load()?;
    apply_overrides(&mut config, &args);

    let verbosity = args.verbosity();
    let model = config.resolve_model(args.model.as_deref());
    let generator = OllamaGenerator::with_config(&config.ollama_url(), &model)?;

    match &args.command {
        Some(Commands::Models) => {
            let models = generator.list_models().await?;
            if models.is_empty() {
                println!("No models installed.");
            } else {
                for name in models {
                    println!("{}", name);
                }
            }
            return Ok(());
        }
        Some(Commands::Config) => {
            println!("Config file: {}", Config::config_path()?.display());
            print!("{}", toml::to_string_pretty(&config)?);
            return Ok(());
        }
        _ => {}
    }

    if verbosity != Verbosity::Quiet && !generator.health_check().await? {
        eprintln!(
            "{}",
            "Warning: Ollama is not reachable. Generation stages will degrade to error notes."
                .yellow()
        );
    }

    let assistant = build_assistant(&args, &config, generator)?;

    match args.command {
        Some(Commands::Chat) => {
            ChatLoop::new(assistant).run().await?;
        }
        Some(Commands::Summarize { document, all }) => {
            run_summarize(&assistant, document, all).await?;
        }
        Some(Commands::Models) | Some(Commands::Config) => unreachable!("handled above"),
        None => {
            let query = args
                .query
                .as_deref()
                .ok_or_else(|| anyhow!("no question provided"))?;
            run_query(&assistant, query, &args.documents, verbosity).await?;
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    config.ollama.host = args.host.clone();
    config.ollama.port = args.port;
    if let Some(top_k) = args.top_k {
        config.retrieval.top_k = top_k;
    }
    if args.sequential {
        config.pipeline.strategy = StrategyKind::Sequential;
    }
}

fn build_assistant(
    args: &Args,
    config: &Config,
    generator: OllamaGenerator,
) -> Result<Assistant> {
    let docs_dir = args
        .docs
        .as_ref()
        .ok_or_else(|| anyhow!("document directory required"))?;

    let mut store = DocumentStore::new(config.chunking.clone(), config.retrieval.clone());
    let loaded = store.load_directory(docs_dir)?;
    if loaded.is_empty() {
        return Err(anyhow!(
            "no .txt or .md documents found in {}",
            docs_dir.display()
        ));
    }
    if args.verbosity() == Verbosity::Verbose {
        eprintln!("[DOCS] Loaded {} documents: {}", loaded.len(), loaded.join(", "));
    }

    for name in &args.documents {
        if !store.contains(name) {
            return Err(anyhow!("document '{}' not found in {}", name, docs_dir.display()));
        }
    }

    Ok(
        Assistant::new(Arc::new(store), Arc::new(generator), config.pipeline.strategy)
            .with_request_delay(config.request_delay())
            .with_verbose(args.verbosity() == Verbosity::Verbose),
    )
}

async fn run_query(
    assistant: &Assistant,
    query: &str,
    documents: &[String],
    verbosity: Verbosity,
) -> Result<()> {
    if documents.len() >= 2 {
        let results = assistant.execute_multi(query, documents).await;
        for result in results.iter() {
            if verbosity != Verbosity::Quiet {
                println!("\n{}", format!("== {} ==", result.document).bold());
            }
            if result.failed {
                eprintln!("{}", result.answer.red());
            } else {
                println!("{}", result.answer);
            }
        }
        return Ok(());
    }

    let document = documents.first().map(|s| s.as_str());
    let (answer, agent_generated) = assistant.ask(query, document).await?;
    if !agent_generated && verbosity != Verbosity::Quiet {
        eprintln!("{}", "(direct answer - pipeline unavailable)".yellow());
    }
    println!("{}", answer);
    Ok(())
}

async fn run_summarize(
    assistant: &Assistant,
    document: Option<String>,
    all: bool,
) -> Result<()> {
    if all {
        let results = assistant.summarize_all().await;
        for (name, result) in results {
            println!("\n{}", format!("== {} ==", name).bold());
            match result {
                Ok(summary) => println!("{}", summary.content),
                Err(e) => eprintln!("{}", format!("Failed: {}", e).red()),
            }
        }
        return Ok(());
    }

    let name = document.ok_or_else(|| anyhow!("pass a document name or --all"))?;
    let summary = assistant.summarize_document(&name).await?;
    println!(
        "{}",
        format!(
            "Summary of {} (model {}, {})",
            summary.document,
            summary.model,
            summary.generated_at.format("%Y-%m-%d %H:%M")
        )
        .bold()
    );
    println!("{}", summary.content);
    Ok(())
}

//! Assistant facade - main coordinator
//!
//! Owns the document store handle, the generation collaborator, and the
//! selected execution strategy, and exposes the two entry points the
//! application shell calls: `execute` (one pipeline over the bound
//! corpus) and `execute_multi` (per-document fan-out). Also carries the
//! supplementary flows: standalone summaries and the direct-answer
//! fallback used when the multi-stage pipeline itself errors.

use crate::documents::DocumentStore;
use crate::errors::Result;
use crate::generation::Generator;
use crate::pipeline::{
    select_strategy, DocumentResultSet, ExecutionStrategy, MultiTargetCoordinator, StrategyKind,
};
use crate::retrieval::RetrieverAdapter;
use crate::summary::{DocumentSummary, SummaryGenerator};
use crate::tools::{AgentToolkit, ToolRegistry, EMPTY_RESULT_MARKER};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

/// Chunks included in a direct-answer context
const FALLBACK_CONTEXT_CHUNKS: usize = 6;

/// Main assistant coordinator
pub struct Assistant {
    store: Arc<DocumentStore>,
    generator: Arc<dyn Generator>,
    strategy: Arc<dyn ExecutionStrategy>,
    registry: ToolRegistry,
    request_delay: Duration,
    verbose: bool,
}

impl Assistant {
    /// Create an assistant over a filled document store
    pub fn new(
        store: Arc<DocumentStore>,
        generator: Arc<dyn Generator>,
        strategy_kind: StrategyKind,
    ) -> Self {
        Self {
            store,
            generator,
            strategy: select_strategy(strategy_kind),
            registry: ToolRegistry::new(),
            request_delay: Duration::from_millis(1000),
            verbose: false,
        }
    }

    /// Pause between bulk generation calls
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Replace the execution strategy with a custom one
    pub fn with_strategy(mut self, strategy: Arc<dyn ExecutionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable stage diagnostics
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the full pipeline over the combined corpus
    pub async fn execute(&self, query: &str) -> Result<String> {
        let adapter = self.store.combined_adapter()?;
        self.execute_with_adapter(query, adapter).await
    }

    /// Run the full pipeline over a single named document
    pub async fn execute_on(&self, query: &str, document: &str) -> Result<String> {
        let adapter = self.store.adapter(document)?;
        self.execute_with_adapter(query, adapter).await
    }

    async fn execute_with_adapter(
        &self,
        query: &str,
        adapter: Arc<RetrieverAdapter>,
    ) -> Result<String> {
        let toolkit = AgentToolkit::new(adapter, Arc::clone(&self.generator));
        let state = self.strategy.execute(&toolkit, query).await?;

        if self.verbose {
            match &state.failure {
                Some(note) => eprintln!(
                    "[PIPELINE] Completed at {} with failure in {}",
                    state.stage().display_name(),
                    note.stage
                ),
                None => eprintln!("[PIPELINE] Completed at {}", state.stage().display_name()),
            }
        }

        state.into_final()
    }

    /// Fan the query out across the named targets, one pipeline each
    pub async fn execute_multi(&self, query: &str, targets: &[String]) -> DocumentResultSet {
        let coordinator = MultiTargetCoordinator::new(
            Arc::clone(&self.store),
            Arc::clone(&self.generator),
            Arc::clone(&self.strategy),
        )
        .with_delay(self.request_delay)
        .with_verbose(self.verbose);

        coordinator.run(query, targets).await
    }

    /// Answer with the pipeline, falling back to a direct single-prompt
    /// answer if the pipeline itself errors
    ///
    /// Returns the answer and whether the agent pipeline produced it.
    pub async fn ask(&self, query: &str, document: Option<&str>) -> Result<(String, bool)> {
        let pipeline_result = match document {
            Some(doc) => self.execute_on(query, doc).await,
            None => self.execute(query).await,
        };

        match pipeline_result {
            Ok(answer) => Ok((answer, true)),
            Err(e) => {
                if self.verbose {
                    eprintln!("[PIPELINE] Execution failed ({}). Using direct answer.", e);
                }
                let answer = self.direct_answer(query, document).await?;
                Ok((answer, false))
            }
        }
    }

    /// Single-prompt answer over retrieved excerpts, bypassing the
    /// multi-stage pipeline
    pub async fn direct_answer(&self, query: &str, document: Option<&str>) -> Result<String> {
        let adapter = match document {
            Some(doc) => self.store.adapter(doc)?,
            None => self.store.combined_adapter()?,
        };

        let chunks = adapter.fetch(query).await?;
        if chunks.is_empty() {
            return Ok(EMPTY_RESULT_MARKER.to_string());
        }

        let excerpts = chunks
            .iter()
            .take(FALLBACK_CONTEXT_CHUNKS)
            .enumerate()
            .map(|(i, c)| format!("Excerpt {} from {}:\n{}", i + 1, c.source_name, c.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        self.generator
            .generate(&direct_answer_prompt(query, &excerpts))
            .await
    }

    /// Generate a standalone summary for one document
    pub async fn summarize_document(&self, document: &str) -> Result<DocumentSummary> {
        let adapter = self.store.adapter(document)?;
        SummaryGenerator::new(Arc::clone(&self.generator))
            .summarize(document, &adapter)
            .await
    }

    /// Generate summaries for every stored document
    ///
    /// Failures are isolated per document; the configured delay is
    /// honored between consecutive generation calls.
    pub async fn summarize_all(&self) -> Vec<(String, Result<DocumentSummary>)> {
        let names = self.store.document_names();
        let pb = ProgressBar::new(names.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("   [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({eta})")
                .expect("Invalid progress bar template")
                .progress_chars("=>-"),
        );

        let mut results = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if i > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
            pb.set_message(format!("Summarizing {}", name));
            results.push((name.clone(), self.summarize_document(name).await));
            pb.inc(1);
        }
        pb.finish_with_message("Summaries complete");

        results
    }

    /// Document store handle
    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    /// Tool descriptions for display surfaces
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Name of the active execution strategy
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Model identifier of the generation collaborator
    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }
}

fn direct_answer_prompt(query: &str, excerpts: &str) -> String {
    format!(
        "Based on the following context from the uploaded document(s), provide a \
         comprehensive and detailed answer to the user's question.\n\n\
         User Question: {}\n\n\
         Document Context:\n{}\n\n\
         Please provide a detailed answer that includes:\n\
         1. **MAIN OVERVIEW**: Clear overview addressing the query\n\
         2. **KEY CONCEPTS**: Detailed explanation of main concepts and ideas\n\
         3. **SPECIFIC DETAILS**: Specific examples, data points, and details from the documents\n\
         4. **STRUCTURED ORGANIZATION**: Clear sections with headings and bullet points\n\
         5. **SOURCE REFERENCES**: Citations to specific excerpts when mentioning information\n\n\
         Detailed Answer:",
        query, excerpts
    )
}

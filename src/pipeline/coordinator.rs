//! Multi-target coordinator
//!
//! Fans one query out across several documents, one full pipeline run
//! per target, and collects the answers keyed by document name. A
//! failing target fills its own slot with an error placeholder and
//! never aborts its siblings. Results always come back in input target
//! order. Scheduling is sequential, with an optional fixed delay
//! between targets as rate-limit fairness toward the generation
//! backend.

use crate::documents::DocumentStore;
use crate::errors::Result;
use crate::generation::Generator;
use crate::pipeline::executor::ExecutionStrategy;
use crate::tools::AgentToolkit;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Outcome for one target document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    pub document: String,
    pub answer: String,
    pub failed: bool,
}

/// Ordered per-document outcomes of one multi-target query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentResultSet {
    results: Vec<DocumentResult>,
}

impl DocumentResultSet {
    /// Results in input target order
    pub fn iter(&self) -> impl Iterator<Item = &DocumentResult> {
        self.results.iter()
    }

    /// Answer for a specific document, if present
    pub fn get(&self, document: &str) -> Option<&DocumentResult> {
        self.results.iter().find(|r| r.document == document)
    }

    /// Document names in result order
    pub fn documents(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.document.as_str()).collect()
    }

    /// Number of per-document results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the set holds no results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Fan-out coordinator over the document store
pub struct MultiTargetCoordinator {
    store: Arc<DocumentStore>,
    generator: Arc<dyn Generator>,
    strategy: Arc<dyn ExecutionStrategy>,
    inter_target_delay: Duration,
    verbose: bool,
}

impl MultiTargetCoordinator {
    pub fn new(
        store: Arc<DocumentStore>,
        generator: Arc<dyn Generator>,
        strategy: Arc<dyn ExecutionStrategy>,
    ) -> Self {
        Self {
            store,
            generator,
            strategy,
            inter_target_delay: Duration::ZERO,
            verbose: false,
        }
    }

    /// Fixed pause between consecutive targets
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.inter_target_delay = delay;
        self
    }

    /// Enable stage diagnostics
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the query against every target, in order
    pub async fn run(&self, query: &str, targets: &[String]) -> DocumentResultSet {
        let mut results = Vec::with_capacity(targets.len());

        for (i, target) in targets.iter().enumerate() {
            if i > 0 && !self.inter_target_delay.is_zero() {
                tokio::time::sleep(self.inter_target_delay).await;
            }

            if self.verbose {
                eprintln!("[COORDINATOR] Processing target {}/{}: {}", i + 1, targets.len(), target);
            }

            match self.run_target(query, target).await {
                Ok((answer, failed)) => results.push(DocumentResult {
                    document: target.clone(),
                    answer,
                    failed,
                }),
                Err(e) => {
                    if self.verbose {
                        eprintln!("[COORDINATOR] Target '{}' failed: {}", target, e);
                    }
                    results.push(DocumentResult {
                        document: target.clone(),
                        answer: format!("Error: could not process {}: {}", target, e),
                        failed: true,
                    });
                }
            }
        }

        DocumentResultSet { results }
    }

    async fn run_target(&self, query: &str, target: &str) -> Result<(String, bool)> {
        let adapter = self.store.adapter(target)?;
        let toolkit = AgentToolkit::new(adapter, Arc::clone(&self.generator));
        let state = self.strategy.execute(&toolkit, query).await?;
        let failed = state.failure.is_some();
        Ok((state.into_final()?, failed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::ChunkingConfig;
    use crate::generation::MockGenerator;
    use crate::pipeline::executor::{select_strategy, StrategyKind};
    use crate::retrieval::SearchParams;

    fn store_with_docs() -> Arc<DocumentStore> {
        let mut store = DocumentStore::new(ChunkingConfig::default(), SearchParams::default());
        store
            .add_document("bio.txt", "txt", "Photosynthesis converts light to chemical energy.")
            .unwrap();
        store
            .add_document("rust.txt", "txt", "Rust is a systems programming language.")
            .unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_run_collects_results_in_target_order() {
        let coordinator = MultiTargetCoordinator::new(
            store_with_docs(),
            Arc::new(MockGenerator::fixed("answer body")),
            select_strategy(StrategyKind::Sequential),
        );

        let targets = vec!["rust.txt".to_string(), "bio.txt".to_string()];
        let results = coordinator.run("photosynthesis light energy", &targets).await;

        assert_eq!(results.documents(), vec!["rust.txt", "bio.txt"]);
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_target_gets_placeholder_and_siblings_survive() {
        let coordinator = MultiTargetCoordinator::new(
            store_with_docs(),
            Arc::new(MockGenerator::fixed("answer body")),
            select_strategy(StrategyKind::Sequential),
        );

        let targets = vec![
            "bio.txt".to_string(),
            "missing.txt".to_string(),
            "rust.txt".to_string(),
        ];
        let results = coordinator.run("photosynthesis light energy", &targets).await;

        assert_eq!(results.len(), 3);
        let missing = results.get("missing.txt").unwrap();
        assert!(missing.failed);
        assert!(missing.answer.contains("missing.txt"));
        assert!(!results.get("bio.txt").unwrap().failed);
        assert!(!results.get("rust.txt").unwrap().failed);
    }
}

//! Execution strategy selection
//!
//! Both executors satisfy one contract: identical stage implementations
//! plus an identical query produce an identical final output. Which one
//! runs is a capability policy chosen at construction time, not a
//! semantic difference: the graph strategy is preferred, and if its
//! workflow fails to compile the sequential strategy is the required
//! fallback, switched transparently and announced once.

use crate::errors::Result;
use crate::pipeline::graph::{CompiledWorkflow, WorkflowGraph};
use crate::pipeline::sequential::SequentialStrategy;
use crate::pipeline::state::PipelineState;
use crate::tools::AgentToolkit;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A pipeline execution strategy
#[async_trait]
pub trait ExecutionStrategy: Send + Sync {
    /// Strategy name for diagnostics
    fn name(&self) -> &'static str;

    /// Run the full pipeline for one query
    async fn execute(&self, toolkit: &AgentToolkit, query: &str) -> Result<PipelineState>;
}

/// Which strategy to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Graph,
    Sequential,
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::Graph
    }
}

/// Graph-runtime execution strategy
pub struct GraphStrategy {
    workflow: CompiledWorkflow,
}

impl GraphStrategy {
    /// Compile the standard pipeline wiring
    pub fn standard() -> Result<Self> {
        Ok(Self {
            workflow: WorkflowGraph::standard().compile()?,
        })
    }

    /// Use a custom compiled workflow
    pub fn with_workflow(workflow: CompiledWorkflow) -> Self {
        Self { workflow }
    }
}

#[async_trait]
impl ExecutionStrategy for GraphStrategy {
    fn name(&self) -> &'static str {
        "graph"
    }

    async fn execute(&self, toolkit: &AgentToolkit, query: &str) -> Result<PipelineState> {
        self.workflow.invoke(toolkit, query).await
    }
}

/// Construct the configured strategy, falling back to sequential when
/// the graph workflow cannot be compiled
pub fn select_strategy(kind: StrategyKind) -> Arc<dyn ExecutionStrategy> {
    match kind {
        StrategyKind::Graph => match GraphStrategy::standard() {
            Ok(strategy) => Arc::new(strategy),
            Err(e) => {
                eprintln!(
                    "[PIPELINE] Graph executor unavailable ({}). Using sequential workflow.",
                    e
                );
                Arc::new(SequentialStrategy::new())
            }
        },
        StrategyKind::Sequential => Arc::new(SequentialStrategy::new()),
    }
}

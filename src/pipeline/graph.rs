//! Graph-based workflow executor
//!
//! Models the pipeline as an explicit graph: named nodes connected by
//! unconditional edges ending at a terminal marker. The graph is
//! compiled up front (edge targets validated, the walk to the terminal
//! verified), so a bad wiring is a setup error, never a runtime
//! surprise. Invocation walks the edges, applying each node's stage
//! function to the state.

use crate::errors::{AssistantError, Result};
use crate::pipeline::state::PipelineState;
use crate::tools::{AgentToolkit, StageValue};
use std::collections::HashMap;

/// Terminal marker every workflow must reach
pub const END: &str = "__end__";

/// The stage function a node executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Retrieve,
    Summarize,
    Analyze,
    Quality,
}

/// Workflow graph under construction
#[derive(Debug, Default)]
pub struct WorkflowGraph {
    nodes: HashMap<String, NodeKind>,
    edges: HashMap<String, String>,
    entry: Option<String>,
}

impl WorkflowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard four-node wiring of the assistant pipeline
    pub fn standard() -> Self {
        let mut graph = Self::new();
        graph.add_node("retriever", NodeKind::Retrieve);
        graph.add_node("summarizer", NodeKind::Summarize);
        graph.add_node("analyst", NodeKind::Analyze);
        graph.add_node("quality", NodeKind::Quality);
        graph.set_entry_point("retriever");
        graph.add_edge("retriever", "summarizer");
        graph.add_edge("summarizer", "analyst");
        graph.add_edge("analyst", "quality");
        graph.add_edge("quality", END);
        graph
    }

    /// Register a named node
    pub fn add_node(&mut self, name: &str, kind: NodeKind) {
        self.nodes.insert(name.to_string(), kind);
    }

    /// Register an unconditional edge
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.edges.insert(from.to_string(), to.to_string());
    }

    /// Set the node execution starts from
    pub fn set_entry_point(&mut self, name: &str) {
        self.entry = Some(name.to_string());
    }

    /// Validate the wiring and freeze it for execution
    pub fn compile(self) -> Result<CompiledWorkflow> {
        let entry = self
            .entry
            .clone()
            .ok_or_else(|| AssistantError::GraphError("no entry point set".to_string()))?;

        if !self.nodes.contains_key(&entry) {
            return Err(AssistantError::GraphError(format!(
                "entry point '{}' is not a node",
                entry
            )));
        }

        for (from, to) in &self.edges {
            if !self.nodes.contains_key(from) {
                return Err(AssistantError::GraphError(format!(
                    "edge source '{}' is not a node",
                    from
                )));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(AssistantError::GraphError(format!(
                    "edge target '{}' is not a node",
                    to
                )));
            }
        }

        // The walk from the entry must reach END without revisiting
        let mut current = entry.clone();
        let mut steps = 0;
        while current != END {
            steps += 1;
            if steps > self.nodes.len() {
                return Err(AssistantError::GraphError(
                    "walk from entry does not reach the terminal marker".to_string(),
                ));
            }
            current = self
                .edges
                .get(&current)
                .cloned()
                .ok_or_else(|| {
                    AssistantError::GraphError(format!("node '{}' has no outgoing edge", current))
                })?;
        }

        Ok(CompiledWorkflow {
            nodes: self.nodes,
            edges: self.edges,
            entry,
        })
    }
}

/// Validated, executable workflow
pub struct CompiledWorkflow {
    nodes: HashMap<String, NodeKind>,
    edges: HashMap<String, String>,
    entry: String,
}

impl CompiledWorkflow {
    /// Walk the graph from the entry, threading the state through each
    /// node until the terminal marker
    pub async fn invoke(&self, toolkit: &AgentToolkit, query: &str) -> Result<PipelineState> {
        let mut state = PipelineState::new(query);
        let mut current = self.entry.clone();

        while current != END {
            // compile() guarantees node and edge lookups succeed
            let kind = self.nodes.get(&current).copied().ok_or_else(|| {
                AssistantError::GraphError(format!("unknown node '{}'", current))
            })?;
            state = run_node(kind, toolkit, state).await?;
            current = self.edges.get(&current).cloned().ok_or_else(|| {
                AssistantError::GraphError(format!("node '{}' has no outgoing edge", current))
            })?;
        }

        Ok(state)
    }

    /// Node names registered in this workflow
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.keys().map(|s| s.as_str()).collect()
    }
}

/// Apply one node's stage function to the state
pub(crate) async fn run_node(
    kind: NodeKind,
    toolkit: &AgentToolkit,
    state: PipelineState,
) -> Result<PipelineState> {
    match kind {
        NodeKind::Retrieve => {
            let output = toolkit.retriever.run(state.query()).await;
            state.with_retrieved(output)
        }
        NodeKind::Summarize => {
            let input = state.retrieved.clone().unwrap_or(StageValue::Empty);
            let value = toolkit.summarizer.run(&input).await;
            state.with_summarized(value)
        }
        NodeKind::Analyze => {
            let input = state.summarized.clone().unwrap_or(StageValue::Empty);
            let value = toolkit.analyzer.run(&input).await;
            state.with_analyzed(value)
        }
        NodeKind::Quality => {
            let input = state.quality_input();
            let formatted = toolkit.formatter.run(&input);
            let cited = toolkit.citations.run(&formatted, &state.chunks);
            state.with_final(&cited)
        }
    }
}

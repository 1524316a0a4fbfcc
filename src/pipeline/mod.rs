//! Multi-stage agent pipeline
//!
//! Orchestrates the stage tools through a strictly linear state
//! machine, behind two interchangeable execution strategies, and fans
//! queries out across documents with per-target failure isolation.

pub mod coordinator;
pub mod executor;
pub mod graph;
pub mod sequential;
pub mod state;

pub use coordinator::{DocumentResult, DocumentResultSet, MultiTargetCoordinator};
pub use executor::{select_strategy, ExecutionStrategy, GraphStrategy, StrategyKind};
pub use graph::{CompiledWorkflow, NodeKind, WorkflowGraph, END};
pub use sequential::SequentialStrategy;
pub use state::{PipelineStage, PipelineState};

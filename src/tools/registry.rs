//! Tool registry
//!
//! Maintains descriptions of the agent tools for the application shell
//! (help output, chat-loop banners).
//!
//! Tools:
//! - retriever: fetch relevant chunks from the bound document
//! - summarizer: condense retrieved content, preserving facts
//! - analyzer: extract themes, metrics, and relationships
//! - formatter: apply structural markup
//! - citations: attribute sources

use std::collections::HashMap;

/// Tool description for display surfaces
#[derive(Debug, Clone)]
pub struct ToolDescription {
    /// Tool name
    pub name: String,

    /// What the tool does
    pub description: String,

    /// Whether the tool calls the generation collaborator
    pub uses_generator: bool,
}

impl ToolDescription {
    fn new(name: &str, description: &str, uses_generator: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            uses_generator,
        }
    }
}

/// Registry of agent tool descriptions
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolDescription>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a registry describing all five tools
    pub fn new() -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
            order: Vec::new(),
        };

        registry.register(ToolDescription::new(
            "retriever",
            "Retrieve relevant document chunks using the bound search adapter",
            false,
        ));
        registry.register(ToolDescription::new(
            "summarizer",
            "Summarize long text into comprehensive, accurate summaries while preserving key information",
            true,
        ));
        registry.register(ToolDescription::new(
            "analyzer",
            "Perform deep analysis on document content to extract insights, patterns, and relationships",
            true,
        ));
        registry.register(ToolDescription::new(
            "formatter",
            "Format content with professional structure and presentation",
            false,
        ));
        registry.register(ToolDescription::new(
            "citations",
            "Ensure proper source attribution in responses",
            false,
        ));

        registry
    }

    fn register(&mut self, tool: ToolDescription) {
        self.order.push(tool.name.clone());
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get a tool description by name
    pub fn get(&self, name: &str) -> Option<&ToolDescription> {
        self.tools.get(name)
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in pipeline order
    pub fn tool_names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Descriptions in pipeline order
    pub fn descriptions(&self) -> Vec<&ToolDescription> {
        self.order.iter().filter_map(|n| self.tools.get(n)).collect()
    }

    /// Names of tools that call the generation collaborator
    pub fn generator_backed_tools(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|n| self.tools.get(*n).map(|t| t.uses_generator).unwrap_or(false))
            .cloned()
            .collect()
    }

    /// One-line description of the stage ordering
    pub fn workflow_description(&self) -> &'static str {
        "Retrieval -> Summarization -> Analysis -> Quality Assurance"
    }

    /// Total number of tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

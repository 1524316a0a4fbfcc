//! Retrieval adapter: one contract over heterogeneous search interfaces
//!
//! A collaborator may expose a semantic "fetch-relevant" call, a generic
//! "invoke" call, or a plain callable. The adapter resolves which one to
//! use exactly once, at construction, in a fixed priority order, and
//! exposes the single `fetch` contract to the pipeline. A collaborator
//! offering none of the three is rejected up front as unsupported: a
//! setup error, not a pipeline failure.

use crate::errors::{AssistantError, Result};
use crate::retrieval::{
    FetchRelevant, Invoke, RetrievedChunk, SearchParams, SharedSearchFn,
};
use std::sync::Arc;

/// Capability facets a retrieval collaborator may offer
///
/// Populate whichever facets the concrete collaborator supports and
/// hand the set to [`RetrieverAdapter::bind`].
#[derive(Default)]
pub struct CapabilitySet {
    pub fetch_relevant: Option<Arc<dyn FetchRelevant>>,
    pub invoke: Option<Arc<dyn Invoke>>,
    pub callable: Option<SharedSearchFn>,
}

impl CapabilitySet {
    /// Capability set with only the semantic-search facet
    pub fn semantic(backend: Arc<dyn FetchRelevant>) -> Self {
        Self {
            fetch_relevant: Some(backend),
            ..Default::default()
        }
    }
}

/// The capability selected at bind time
enum BoundCapability {
    FetchRelevant(Arc<dyn FetchRelevant>),
    Invoke(Arc<dyn Invoke>),
    Callable(SharedSearchFn),
}

impl BoundCapability {
    fn name(&self) -> &'static str {
        match self {
            BoundCapability::FetchRelevant(_) => "fetch_relevant",
            BoundCapability::Invoke(_) => "invoke",
            BoundCapability::Callable(_) => "callable",
        }
    }
}

/// Normalized retrieval interface consumed by the pipeline
pub struct RetrieverAdapter {
    capability: BoundCapability,
    params: SearchParams,
}

impl RetrieverAdapter {
    /// Bind the highest-priority capability the collaborator offers
    ///
    /// Priority: fetch-relevant, then invoke, then plain callable.
    pub fn bind(capabilities: CapabilitySet, params: SearchParams) -> Result<Self> {
        let capability = if let Some(backend) = capabilities.fetch_relevant {
            BoundCapability::FetchRelevant(backend)
        } else if let Some(tool) = capabilities.invoke {
            BoundCapability::Invoke(tool)
        } else if let Some(func) = capabilities.callable {
            BoundCapability::Callable(func)
        } else {
            return Err(AssistantError::UnsupportedRetriever(
                "unsupported".to_string(),
            ));
        };

        Ok(Self { capability, params })
    }

    /// Fetch ranked chunks for a query
    ///
    /// An empty result is a valid result, not an error: the caller maps
    /// it to the empty-result condition, never to a failure.
    pub async fn fetch(&self, query: &str) -> Result<Vec<RetrievedChunk>> {
        let result = match &self.capability {
            BoundCapability::FetchRelevant(backend) => {
                backend.fetch_relevant(query, &self.params).await
            }
            BoundCapability::Invoke(tool) => tool.invoke(query).await,
            BoundCapability::Callable(func) => func(query),
        };

        result.map_err(|e| AssistantError::RetrievalFailed {
            reason: e.to_string(),
        })
    }

    /// Name of the capability selected at bind time
    pub fn capability_name(&self) -> &'static str {
        self.capability.name()
    }

    /// Search parameters this adapter was bound with
    pub fn params(&self) -> &SearchParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubSemantic;

    #[async_trait]
    impl FetchRelevant for StubSemantic {
        async fn fetch_relevant(
            &self,
            _query: &str,
            _params: &SearchParams,
        ) -> Result<Vec<RetrievedChunk>> {
            Ok(vec![RetrievedChunk {
                content: "semantic hit".to_string(),
                source_name: "a.txt".to_string(),
                source_format: "txt".to_string(),
                score: 0.9,
            }])
        }
    }

    struct StubInvoke;

    #[async_trait]
    impl Invoke for StubInvoke {
        async fn invoke(&self, _input: &str) -> Result<Vec<RetrievedChunk>> {
            Ok(vec![RetrievedChunk {
                content: "invoke hit".to_string(),
                source_name: "b.txt".to_string(),
                source_format: "txt".to_string(),
                score: 0.5,
            }])
        }
    }

    #[test]
    fn test_bind_rejects_empty_capability_set() {
        let result = RetrieverAdapter::bind(CapabilitySet::default(), SearchParams::default());
        match result {
            Err(AssistantError::UnsupportedRetriever(reason)) => {
                assert_eq!(reason, "unsupported");
            }
            _ => panic!("expected UnsupportedRetriever"),
        }
    }

    #[test]
    fn test_bind_prefers_fetch_relevant_over_invoke() {
        let caps = CapabilitySet {
            fetch_relevant: Some(Arc::new(StubSemantic)),
            invoke: Some(Arc::new(StubInvoke)),
            callable: None,
        };
        let adapter = RetrieverAdapter::bind(caps, SearchParams::default()).unwrap();
        assert_eq!(adapter.capability_name(), "fetch_relevant");
    }

    #[test]
    fn test_bind_falls_through_to_callable() {
        let caps = CapabilitySet {
            fetch_relevant: None,
            invoke: None,
            callable: Some(Arc::new(|_query: &str| Ok(Vec::new()))),
        };
        let adapter = RetrieverAdapter::bind(caps, SearchParams::default()).unwrap();
        assert_eq!(adapter.capability_name(), "callable");
    }

    #[tokio::test]
    async fn test_fetch_through_invoke_capability() {
        let caps = CapabilitySet {
            fetch_relevant: None,
            invoke: Some(Arc::new(StubInvoke)),
            callable: None,
        };
        let adapter = RetrieverAdapter::bind(caps, SearchParams::default()).unwrap();

        let chunks = adapter.fetch("anything").await.unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].source_name, "b.txt");
    }

    #[tokio::test]
    async fn test_fetch_wraps_backend_errors() {
        let caps = CapabilitySet {
            fetch_relevant: None,
            invoke: None,
            callable: Some(Arc::new(|_query: &str| {
                Err(AssistantError::Generic("index offline".to_string()))
            })),
        };
        let adapter = RetrieverAdapter::bind(caps, SearchParams::default()).unwrap();

        match adapter.fetch("q").await {
            Err(AssistantError::RetrievalFailed { reason }) => {
                assert!(reason.contains("index offline"));
            }
            _ => panic!("expected RetrievalFailed"),
        }
    }
}

//! Integration tests for multi-document fan-out
//!
//! Covers failure isolation, result ordering, and the supplementary
//! summary flow over the document store.

use docbuddy::assistant::Assistant;
use docbuddy::documents::{ChunkingConfig, DocumentStore};
use docbuddy::generation::MockGenerator;
use docbuddy::pipeline::{select_strategy, MultiTargetCoordinator, StrategyKind};
use docbuddy::retrieval::{CapabilitySet, RetrieverAdapter, SearchParams};
use docbuddy::AssistantError;
use std::sync::Arc;
use std::time::Duration;

fn raising_adapter() -> Arc<RetrieverAdapter> {
    let caps = CapabilitySet {
        fetch_relevant: None,
        invoke: None,
        callable: Some(Arc::new(|_q: &str| {
            Err(AssistantError::Generic("vector index corrupted".to_string()))
        })),
    };
    Arc::new(RetrieverAdapter::bind(caps, SearchParams::default()).unwrap())
}

fn three_doc_store() -> Arc<DocumentStore> {
    let mut store = DocumentStore::new(ChunkingConfig::default(), SearchParams::default());
    store
        .add_document(
            "a.txt",
            "txt",
            "Photosynthesis converts light to chemical energy in plants. \
             These key points cover the main topics and findings of the field.",
        )
        .unwrap();
    store.add_document_with_adapter("b.txt", "txt", raising_adapter());
    store
        .add_document(
            "c.txt",
            "txt",
            "Photosynthesis also occurs in algae and cyanobacteria. \
             The methodology and approach here follow the main topics.",
        )
        .unwrap();
    Arc::new(store)
}

#[tokio::test]
async fn failing_target_is_isolated_and_order_is_preserved() {
    let coordinator = MultiTargetCoordinator::new(
        three_doc_store(),
        Arc::new(MockGenerator::fixed("a perfectly good answer")),
        select_strategy(StrategyKind::Graph),
    );

    let targets = vec!["a.txt".to_string(), "b.txt".to_string(), "c.txt".to_string()];
    let results = coordinator.run("photosynthesis light energy", &targets).await;

    assert_eq!(results.documents(), vec!["a.txt", "b.txt", "c.txt"]);

    let a = results.get("a.txt").unwrap();
    assert!(!a.failed);
    assert!(a.answer.contains("a perfectly good answer"));

    let b = results.get("b.txt").unwrap();
    assert!(b.failed);
    assert!(b.answer.contains("Error"));
    assert!(b.answer.contains("vector index corrupted"));

    let c = results.get("c.txt").unwrap();
    assert!(!c.failed);
    assert!(c.answer.contains("a perfectly good answer"));
}

#[tokio::test]
async fn unknown_target_gets_placeholder_naming_it() {
    let coordinator = MultiTargetCoordinator::new(
        three_doc_store(),
        Arc::new(MockGenerator::fixed("answer")),
        select_strategy(StrategyKind::Sequential),
    );

    let targets = vec!["a.txt".to_string(), "ghost.txt".to_string()];
    let results = coordinator.run("photosynthesis", &targets).await;

    let ghost = results.get("ghost.txt").unwrap();
    assert!(ghost.failed);
    assert!(ghost.answer.contains("ghost.txt"));
}

#[tokio::test]
async fn strategies_agree_per_target_across_the_set() {
    let query = "photosynthesis light energy";
    let targets = vec!["a.txt".to_string(), "b.txt".to_string(), "c.txt".to_string()];

    let graph_results = MultiTargetCoordinator::new(
        three_doc_store(),
        Arc::new(MockGenerator::fixed("same answer")),
        select_strategy(StrategyKind::Graph),
    )
    .run(query, &targets)
    .await;

    let sequential_results = MultiTargetCoordinator::new(
        three_doc_store(),
        Arc::new(MockGenerator::fixed("same answer")),
        select_strategy(StrategyKind::Sequential),
    )
    .run(query, &targets)
    .await;

    for (g, s) in graph_results.iter().zip(sequential_results.iter()) {
        assert_eq!(g.document, s.document);
        assert_eq!(g.answer, s.answer);
        assert_eq!(g.failed, s.failed);
    }
}

#[tokio::test]
async fn assistant_execute_multi_matches_coordinator_contract() {
    let assistant = Assistant::new(
        three_doc_store(),
        Arc::new(MockGenerator::fixed("body")),
        StrategyKind::Graph,
    )
    .with_request_delay(Duration::ZERO);

    let targets = vec!["c.txt".to_string(), "a.txt".to_string()];
    let results = assistant
        .execute_multi("photosynthesis in algae", &targets)
        .await;

    // No reordering by completion time: input order is result order
    assert_eq!(results.documents(), vec!["c.txt", "a.txt"]);
}

#[tokio::test]
async fn summaries_are_isolated_per_document() {
    let assistant = Assistant::new(
        three_doc_store(),
        Arc::new(MockGenerator::fixed("summary text")),
        StrategyKind::Sequential,
    )
    .with_request_delay(Duration::ZERO);

    let results = assistant.summarize_all().await;
    assert_eq!(results.len(), 3);

    let (name_a, result_a) = &results[0];
    assert_eq!(name_a, "a.txt");
    assert!(result_a.is_ok());

    // b.txt's raising adapter fails its summary without affecting c.txt
    let (name_b, result_b) = &results[1];
    assert_eq!(name_b, "b.txt");
    assert!(result_b.is_err());

    let (name_c, result_c) = &results[2];
    assert_eq!(name_c, "c.txt");
    assert!(result_c.is_ok());
}

#[tokio::test]
async fn stores_do_not_share_documents() {
    let first = three_doc_store();
    let second = DocumentStore::new(ChunkingConfig::default(), SearchParams::default());

    assert!(first.contains("a.txt"));
    assert!(!second.contains("a.txt"));
    assert!(second.is_empty());
}

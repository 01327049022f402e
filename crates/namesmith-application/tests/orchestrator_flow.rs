//! End-to-end orchestrator behaviour against scripted generators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::oneshot;

use namesmith_application::{
    FavoritesManager, GenerationOutcome, NameRequestOrchestrator, OrchestratorOptions,
};
use namesmith_core::favorites::{FavoriteToggle, FavoritesRepository};
use namesmith_core::generation::{
    GenerationError, GenerationErrorKind, GenerationRequest, NameGenerator,
};
use namesmith_core::name::{Gender, NameRecord};
use namesmith_infrastructure::{InMemoryFavoritesRepository, JsonFavoritesRepository};
use namesmith_interaction::RequestComposer;

type Reply = Result<Vec<NameRecord>, GenerationError>;

fn name(transliteration: &str) -> NameRecord {
    NameRecord::new("-", transliteration, "meaning", "Arabic", Gender::Unisex)
}

fn transliterations(records: &[NameRecord]) -> Vec<String> {
    records.iter().map(|r| r.transliteration.clone()).collect()
}

/// Returns queued replies in order; an exhausted queue yields empty batches.
struct ScriptedGenerator {
    replies: Mutex<VecDeque<Reply>>,
}

impl ScriptedGenerator {
    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }
}

#[async_trait]
impl NameGenerator for ScriptedGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Reply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Each call takes the next gate and waits for the test to release it.
struct GatedGenerator {
    gates: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    entered: AtomicUsize,
}

impl GatedGenerator {
    fn new(gates: Vec<oneshot::Receiver<Reply>>) -> Self {
        Self {
            gates: Mutex::new(gates.into()),
            entered: AtomicUsize::new(0),
        }
    }

    async fn wait_for_calls(&self, expected: usize) {
        while self.entered.load(Ordering::SeqCst) < expected {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl NameGenerator for GatedGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Reply {
        let gate = {
            let mut gates = self.gates.lock().unwrap();
            let gate = gates.pop_front();
            self.entered.fetch_add(1, Ordering::SeqCst);
            gate
        };
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(GenerationError::Transport("gate dropped".into()))),
            None => Ok(Vec::new()),
        }
    }
}

async fn build(
    generator: Arc<dyn NameGenerator>,
    repository: Arc<dyn FavoritesRepository>,
    single_flight: bool,
) -> NameRequestOrchestrator {
    NameRequestOrchestrator::new(
        generator,
        RequestComposer::new("Arabic"),
        FavoritesManager::load(repository).await,
        OrchestratorOptions {
            single_flight,
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn test_generate_replaces_and_load_more_appends() {
    let generator = ScriptedGenerator::new(vec![
        Ok(vec![name("Ali"), name("Omar")]),
        Ok(vec![name("Omar"), name("Huda")]),
        Ok(vec![name("Zaid")]),
    ]);
    let orchestrator = build(
        Arc::new(generator),
        Arc::new(InMemoryFavoritesRepository::new()),
        false,
    )
    .await;

    assert_eq!(
        orchestrator.generate().await,
        GenerationOutcome::Applied {
            received: 2,
            total: 2
        }
    );
    assert_eq!(
        orchestrator.load_more().await,
        GenerationOutcome::Applied {
            received: 2,
            total: 4
        }
    );
    assert_eq!(
        transliterations(&orchestrator.results()),
        vec!["Ali", "Omar", "Omar", "Huda"]
    );

    assert_eq!(orchestrator.dedup_results(), 1);
    assert_eq!(orchestrator.result_count(), 3);

    orchestrator.generate().await;
    assert_eq!(transliterations(&orchestrator.results()), vec!["Zaid"]);

    orchestrator.clear_results();
    assert_eq!(orchestrator.result_count(), 0);
}

#[tokio::test]
async fn test_failures_leave_results_untouched() {
    let generator = ScriptedGenerator::new(vec![
        Ok(vec![name("Ali")]),
        Err(GenerationError::MalformedPayload("expected value".into())),
        Err(GenerationError::Transport("connection refused".into())),
        Err(GenerationError::SchemaViolation("missing field `gender`".into())),
    ]);
    let orchestrator = build(
        Arc::new(generator),
        Arc::new(InMemoryFavoritesRepository::new()),
        false,
    )
    .await;

    orchestrator.generate().await;

    assert_eq!(
        orchestrator.generate().await,
        GenerationOutcome::Failed(GenerationErrorKind::MalformedPayload)
    );
    assert_eq!(
        orchestrator.load_more().await,
        GenerationOutcome::Failed(GenerationErrorKind::Transport)
    );
    assert_eq!(
        orchestrator.generate().await,
        GenerationOutcome::Failed(GenerationErrorKind::SchemaViolation)
    );

    assert_eq!(transliterations(&orchestrator.results()), vec!["Ali"]);
    assert!(!orchestrator.is_loading());
}

#[tokio::test]
async fn test_empty_batch_on_generate_clears_list() {
    let generator = ScriptedGenerator::new(vec![Ok(vec![name("Ali")]), Ok(Vec::new())]);
    let orchestrator = build(
        Arc::new(generator),
        Arc::new(InMemoryFavoritesRepository::new()),
        false,
    )
    .await;

    orchestrator.generate().await;
    assert_eq!(
        orchestrator.generate().await,
        GenerationOutcome::Applied {
            received: 0,
            total: 0
        }
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_calls_apply_in_completion_order() {
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    let generator = Arc::new(GatedGenerator::new(vec![first_rx, second_rx]));
    let orchestrator = build(
        generator.clone(),
        Arc::new(InMemoryFavoritesRepository::new()),
        false,
    )
    .await;

    let first = tokio::spawn({
        let orchestrator = orchestrator.clone();
        async move { orchestrator.generate().await }
    });
    generator.wait_for_calls(1).await;

    let second = tokio::spawn({
        let orchestrator = orchestrator.clone();
        async move { orchestrator.load_more().await }
    });
    generator.wait_for_calls(2).await;
    assert_eq!(orchestrator.in_flight(), 2);

    // The later "load more" resolves first and appends to the empty list.
    second_tx.send(Ok(vec![name("Huda")])).unwrap();
    assert_eq!(
        second.await.unwrap(),
        GenerationOutcome::Applied {
            received: 1,
            total: 1
        }
    );
    assert!(orchestrator.is_loading());

    // The earlier "generate" lands last and replaces everything.
    first_tx.send(Ok(vec![name("Ali"), name("Omar")])).unwrap();
    assert_eq!(
        first.await.unwrap(),
        GenerationOutcome::Applied {
            received: 2,
            total: 2
        }
    );

    assert_eq!(transliterations(&orchestrator.results()), vec!["Ali", "Omar"]);
    assert!(!orchestrator.is_loading());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_single_flight_rejects_second_call() {
    let (tx, rx) = oneshot::channel();
    let generator = Arc::new(GatedGenerator::new(vec![rx]));
    let orchestrator = build(
        generator.clone(),
        Arc::new(InMemoryFavoritesRepository::new()),
        true,
    )
    .await;

    let pending = tokio::spawn({
        let orchestrator = orchestrator.clone();
        async move { orchestrator.generate().await }
    });
    generator.wait_for_calls(1).await;

    assert_eq!(orchestrator.load_more().await, GenerationOutcome::Busy);
    assert_eq!(orchestrator.in_flight(), 1);

    tx.send(Ok(vec![name("Ali")])).unwrap();
    assert_eq!(
        pending.await.unwrap(),
        GenerationOutcome::Applied {
            received: 1,
            total: 1
        }
    );
    assert!(!orchestrator.is_loading());
}

#[tokio::test]
async fn test_favorites_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("favorites.json");

    let generator = ScriptedGenerator::new(vec![Ok(vec![name("Ali"), name("Layla")])]);
    let orchestrator = build(
        Arc::new(generator),
        Arc::new(JsonFavoritesRepository::with_path(path.clone())),
        false,
    )
    .await;
    orchestrator.generate().await;

    let (_, outcome) = orchestrator.toggle_favorite_at(1).await.unwrap();
    assert_eq!(outcome, FavoriteToggle::Added);
    orchestrator.toggle_favorite_at(0).await.unwrap();

    let restarted = build(
        Arc::new(ScriptedGenerator::new(Vec::new())),
        Arc::new(JsonFavoritesRepository::with_path(path)),
        false,
    )
    .await;

    assert_eq!(
        transliterations(&restarted.favorites().await),
        vec!["Layla", "Ali"]
    );
    assert!(restarted.results().is_empty());
}

#[tokio::test]
async fn test_corrupt_favorites_start_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("favorites.json");
    std::fs::write(&path, "{\"this is\": \"not a list\"}").unwrap();

    let orchestrator = build(
        Arc::new(ScriptedGenerator::new(Vec::new())),
        Arc::new(JsonFavoritesRepository::with_path(path.clone())),
        false,
    )
    .await;

    assert!(orchestrator.favorites().await.is_empty());

    // The next mutation overwrites the corrupt file with valid data.
    orchestrator.toggle_favorite(name("Noor")).await;
    let repo = JsonFavoritesRepository::with_path(path);
    assert_eq!(repo.load().await.unwrap().len(), 1);
}

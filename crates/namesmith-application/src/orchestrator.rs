//! Name Request Orchestrator.
//!
//! Owns the preferences, the displayed results, the favorites and the loading
//! flag. Generation calls may overlap: each one applies its batch when it
//! completes, in completion order. Failures are logged and leave the results
//! untouched.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use namesmith_core::NamesmithError;
use namesmith_core::favorites::FavoriteToggle;
use namesmith_core::generation::{GenerationErrorKind, NameGenerator};
use namesmith_core::name::{MergeMode, NameRecord, ResultSet};
use namesmith_core::preference::{BatchSize, GenderFilter, PreferenceState};
use namesmith_interaction::RequestComposer;

use crate::favorites::FavoritesManager;

/// What a generate / load-more call did to the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The batch landed. `total` is the list length right after merging.
    Applied { received: usize, total: usize },
    /// Nothing changed; the failure was logged.
    Failed(GenerationErrorKind),
    /// Rejected because another call is pending and single-flight is on.
    Busy,
}

#[derive(Debug, Clone, Default)]
pub struct OrchestratorOptions {
    /// Reject a call while another one is still in flight.
    pub single_flight: bool,
    pub batch_size: BatchSize,
}

/// Cloneable handle; clones share the same state.
#[derive(Clone)]
pub struct NameRequestOrchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    generator: Arc<dyn NameGenerator>,
    composer: RequestComposer,
    preferences: Mutex<PreferenceState>,
    results: Mutex<ResultSet>,
    favorites: tokio::sync::Mutex<FavoritesManager>,
    in_flight: AtomicUsize,
    single_flight: bool,
}

/// Decrements the in-flight counter when the call finishes, however it ends.
struct InFlightGuard<'a> {
    counter: &'a AtomicUsize,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // State stays consistent across a panic: every critical section is a
    // single assignment or merge.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl NameRequestOrchestrator {
    pub fn new(
        generator: Arc<dyn NameGenerator>,
        composer: RequestComposer,
        favorites: FavoritesManager,
        options: OrchestratorOptions,
    ) -> Self {
        let mut preferences = PreferenceState::new();
        preferences.set_batch_size(options.batch_size);

        Self {
            inner: Arc::new(Inner {
                generator,
                composer,
                preferences: Mutex::new(preferences),
                results: Mutex::new(ResultSet::new()),
                favorites: tokio::sync::Mutex::new(favorites),
                in_flight: AtomicUsize::new(0),
                single_flight: options.single_flight,
            }),
        }
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    pub fn preferences(&self) -> PreferenceState {
        lock(&self.inner.preferences).clone()
    }

    pub fn set_gender_filter(&self, filter: GenderFilter) {
        lock(&self.inner.preferences).set_gender_filter(filter);
    }

    pub fn set_starting_letter(&self, letter: &str) {
        lock(&self.inner.preferences).set_starting_letter(letter);
    }

    pub fn set_theme(&self, theme: impl Into<String>) {
        lock(&self.inner.preferences).set_theme_text(theme);
    }

    pub fn set_batch_size(&self, size: u32) -> Result<(), NamesmithError> {
        let size = BatchSize::new(size)?;
        lock(&self.inner.preferences).set_batch_size(size);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    pub fn results(&self) -> Vec<NameRecord> {
        lock(&self.inner.results).records().to_vec()
    }

    pub fn result_count(&self) -> usize {
        lock(&self.inner.results).len()
    }

    /// Returns the result at a zero-based position.
    pub fn result(&self, index: usize) -> Option<NameRecord> {
        lock(&self.inner.results).get(index).cloned()
    }

    pub fn clear_results(&self) {
        lock(&self.inner.results).clear();
        tracing::debug!("[Orchestrator] Results cleared");
    }

    /// Removes later duplicates by transliteration. Returns how many went.
    pub fn dedup_results(&self) -> usize {
        lock(&self.inner.results).dedup_by_identity()
    }

    /// True while at least one generation call is pending.
    pub fn is_loading(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Fresh request: the batch replaces the current results.
    pub async fn generate(&self) -> GenerationOutcome {
        self.run(MergeMode::Replace).await
    }

    /// "Load more": the batch is appended to the current results.
    pub async fn load_more(&self) -> GenerationOutcome {
        self.run(MergeMode::Append).await
    }

    fn begin_request(&self) -> Option<InFlightGuard<'_>> {
        let counter = &self.inner.in_flight;
        if self.inner.single_flight {
            counter
                .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                .ok()?;
        } else {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        Some(InFlightGuard { counter })
    }

    async fn run(&self, mode: MergeMode) -> GenerationOutcome {
        let Some(_guard) = self.begin_request() else {
            tracing::info!("[Orchestrator] Generation already in flight, ignoring {:?}", mode);
            return GenerationOutcome::Busy;
        };

        let preferences = self.preferences();
        let request = match self.inner.composer.compose(&preferences) {
            Ok(request) => request,
            Err(err) => {
                tracing::error!(kind = %err.kind(), "[Orchestrator] {}", err);
                return GenerationOutcome::Failed(err.kind());
            }
        };

        tracing::info!(
            count = request.count,
            mode = ?mode,
            "[Orchestrator] Requesting names"
        );

        match self.inner.generator.generate(&request).await {
            Ok(records) => {
                let received = records.len();
                let total = {
                    let mut results = lock(&self.inner.results);
                    results.merge(records, mode);
                    results.len()
                };
                tracing::info!(
                    received,
                    total,
                    "[Orchestrator] Applied generated batch"
                );
                GenerationOutcome::Applied { received, total }
            }
            Err(err) => {
                tracing::error!(
                    kind = %err.kind(),
                    "[Orchestrator] Generation failed, keeping current results: {}",
                    err
                );
                GenerationOutcome::Failed(err.kind())
            }
        }
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    pub async fn favorites(&self) -> Vec<NameRecord> {
        self.inner.favorites.lock().await.records().to_vec()
    }

    pub async fn is_favorite(&self, transliteration: &str) -> bool {
        self.inner.favorites.lock().await.is_favorite(transliteration)
    }

    pub async fn toggle_favorite(&self, record: NameRecord) -> FavoriteToggle {
        self.inner.favorites.lock().await.toggle(record).await
    }

    /// Toggles the result at `index`. `None` if there is no such result.
    pub async fn toggle_favorite_at(&self, index: usize) -> Option<(NameRecord, FavoriteToggle)> {
        let record = self.result(index)?;
        let outcome = self.toggle_favorite(record.clone()).await;
        Some((record, outcome))
    }

    pub async fn remove_favorite(&self, transliteration: &str) -> bool {
        self.inner.favorites.lock().await.remove(transliteration).await
    }

    pub async fn clear_favorites(&self) {
        self.inner.favorites.lock().await.clear().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use namesmith_core::generation::{GenerationError, GenerationRequest};
    use namesmith_core::name::Gender;
    use namesmith_infrastructure::InMemoryFavoritesRepository;

    /// Echoes the request back as a single record so tests can see what was asked.
    struct EchoGenerator;

    #[async_trait]
    impl NameGenerator for EchoGenerator {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<Vec<NameRecord>, GenerationError> {
            Ok(vec![NameRecord::new(
                "-",
                format!("{}-{:?}", request.count, request.starting_letter),
                request.instruction.clone(),
                "test",
                request.gender.unwrap_or(Gender::Unisex),
            )])
        }
    }

    async fn orchestrator() -> NameRequestOrchestrator {
        let favorites =
            FavoritesManager::load(Arc::new(InMemoryFavoritesRepository::new())).await;
        NameRequestOrchestrator::new(
            Arc::new(EchoGenerator),
            RequestComposer::new("Arabic"),
            favorites,
            OrchestratorOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_preferences_flow_into_request() {
        let orchestrator = orchestrator().await;
        orchestrator.set_gender_filter(GenderFilter::Girl);
        orchestrator.set_starting_letter("m");
        orchestrator.set_batch_size(5).unwrap();

        orchestrator.generate().await;

        let record = orchestrator.result(0).unwrap();
        assert_eq!(record.transliteration, "5-Some('M')");
        assert_eq!(record.gender, Gender::Girl);
        assert!(record.meaning.contains("starting with the letter: M"));
    }

    #[tokio::test]
    async fn test_invalid_batch_size_keeps_previous() {
        let orchestrator = orchestrator().await;
        assert!(orchestrator.set_batch_size(12).is_err());
        assert_eq!(orchestrator.preferences().batch_size().get(), 10);
    }

    #[tokio::test]
    async fn test_toggle_favorite_at_out_of_range() {
        let orchestrator = orchestrator().await;
        assert!(orchestrator.toggle_favorite_at(0).await.is_none());

        orchestrator.generate().await;
        let (record, outcome) = orchestrator.toggle_favorite_at(0).await.unwrap();
        assert_eq!(outcome, FavoriteToggle::Added);
        assert!(orchestrator.is_favorite(&record.transliteration).await);
    }
}

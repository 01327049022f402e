//! Wires configuration, secrets, storage and the generator into an
//! orchestrator.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use namesmith_core::config::AppConfig;
use namesmith_core::favorites::FavoritesRepository;
use namesmith_core::generation::{GenerationError, GenerationRequest, NameGenerator};
use namesmith_core::name::NameRecord;
use namesmith_core::preference::BatchSize;
use namesmith_infrastructure::{
    ConfigService, InMemoryFavoritesRepository, JsonFavoritesRepository, NamesmithPaths,
    SecretService,
};
use namesmith_interaction::{GeminiNameGenerator, RequestComposer};

use crate::favorites::FavoritesManager;
use crate::orchestrator::{NameRequestOrchestrator, OrchestratorOptions};

#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// Replaces the platform config directory.
    pub config_dir: Option<PathBuf>,
    /// Keep favorites in memory only.
    pub ephemeral: bool,
}

pub struct AppBootstrap {
    pub config: AppConfig,
    pub orchestrator: NameRequestOrchestrator,
    /// False when no API key was found; generation calls will fail.
    pub credential_available: bool,
}

/// Stand-in used when the real generator could not be built, so favorites
/// and export keep working without a key.
struct UnavailableGenerator {
    error: GenerationError,
}

#[async_trait]
impl NameGenerator for UnavailableGenerator {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<Vec<NameRecord>, GenerationError> {
        Err(self.error.clone())
    }
}

impl AppBootstrap {
    pub async fn initialize(options: &BootstrapOptions) -> Result<Self> {
        let paths = NamesmithPaths::new(options.config_dir.as_deref());

        let config = ConfigService::new(&paths)?
            .load_or_init()
            .context("Failed to load configuration")?;
        tracing::info!(
            "[Bootstrap] Using model {} for {} names",
            config.generation.model,
            config.generation.tradition
        );

        let api_key = SecretService::new(&paths)?.gemini_api_key();
        let (generator, credential_available): (Arc<dyn NameGenerator>, bool) =
            match GeminiNameGenerator::from_config(&config.generation, api_key) {
                Ok(generator) => (Arc::new(generator), true),
                Err(error) => {
                    tracing::warn!("[Bootstrap] Generation unavailable: {}", error);
                    (Arc::new(UnavailableGenerator { error }), false)
                }
            };

        let repository: Arc<dyn FavoritesRepository> = if options.ephemeral {
            tracing::info!("[Bootstrap] Favorites will not be persisted");
            Arc::new(InMemoryFavoritesRepository::new())
        } else {
            Arc::new(JsonFavoritesRepository::new(&paths)?)
        };
        let favorites = FavoritesManager::load(repository).await;

        let batch_size =
            BatchSize::new(config.generation.default_batch_size).unwrap_or_else(|e| {
                tracing::warn!("[Bootstrap] {}; using default batch size", e);
                BatchSize::default()
            });

        let orchestrator = NameRequestOrchestrator::new(
            generator,
            RequestComposer::new(config.generation.tradition.clone()),
            favorites,
            OrchestratorOptions {
                single_flight: config.generation.single_flight,
                batch_size,
            },
        );

        Ok(Self {
            config,
            orchestrator,
            credential_available,
        })
    }
}

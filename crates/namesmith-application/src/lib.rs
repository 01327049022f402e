pub mod bootstrap;
pub mod export;
pub mod favorites;
pub mod orchestrator;
pub mod share;

pub use bootstrap::{AppBootstrap, BootstrapOptions};
pub use favorites::FavoritesManager;
pub use orchestrator::{GenerationOutcome, NameRequestOrchestrator, OrchestratorOptions};
pub use share::{LinkOpener, ShareChannel, ShareOutcome, ShareService};

pub mod config_service;
pub mod favorites_repository;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::favorites_repository::{InMemoryFavoritesRepository, JsonFavoritesRepository};
pub use crate::paths::NamesmithPaths;
pub use crate::secret_service::{GEMINI_API_KEY_ENV, SecretService};

//! Favorites domain models and repository traits.
//!
//! The favorites list is the only state that survives a restart.

mod model;
mod repository;

pub use model::{FavoriteToggle, FavoritesSet};
pub use repository::FavoritesRepository;

//! Domain layer for Namesmith.
//!
//! Holds the name/preference/favorites models, the result merge rules, and the
//! traits that infrastructure and interaction crates implement. Nothing in this
//! crate performs I/O.

pub mod config;
pub mod error;
pub mod favorites;
pub mod generation;
pub mod name;
pub mod preference;

// Re-export common error type
pub use error::NamesmithError;

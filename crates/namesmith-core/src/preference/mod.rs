//! Request parameters chosen by the user.
//!
//! Preferences live in memory only and reset when the process restarts.

mod model;

pub use model::{BatchSize, GenderFilter, PreferenceState};

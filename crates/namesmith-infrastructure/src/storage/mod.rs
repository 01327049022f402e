//! Low-level file storage helpers.

pub mod atomic_file;

pub use atomic_file::{AtomicFile, FileFormat};

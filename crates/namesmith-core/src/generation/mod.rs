//! Contract between the orchestrator and the external generation service.

mod error;
mod generator;
mod request;

pub use error::{GenerationError, GenerationErrorKind};
pub use generator::NameGenerator;
pub use request::GenerationRequest;

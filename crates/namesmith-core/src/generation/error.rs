//! Generation failure taxonomy.

use strum::Display;
use thiserror::Error;

/// Why a generation call produced no records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The service could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The payload text is not valid JSON.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The payload is JSON but not an array of name records.
    #[error("Payload does not match the name schema: {0}")]
    SchemaViolation(String),

    /// No credential is configured for the service.
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// The instruction could not be rendered.
    #[error("Failed to compose request: {0}")]
    Compose(String),
}

/// Fieldless discriminant of [`GenerationError`], for logging and UI notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum GenerationErrorKind {
    Transport,
    Service,
    MalformedPayload,
    SchemaViolation,
    MissingCredential,
    Compose,
}

impl GenerationError {
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            Self::Transport(_) => GenerationErrorKind::Transport,
            Self::Service { .. } => GenerationErrorKind::Service,
            Self::MalformedPayload(_) => GenerationErrorKind::MalformedPayload,
            Self::SchemaViolation(_) => GenerationErrorKind::SchemaViolation,
            Self::MissingCredential(_) => GenerationErrorKind::MissingCredential,
            Self::Compose(_) => GenerationErrorKind::Compose,
        }
    }
}

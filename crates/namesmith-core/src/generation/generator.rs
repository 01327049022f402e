//! Generation service trait.

use async_trait::async_trait;

use super::error::GenerationError;
use super::request::GenerationRequest;
use crate::name::NameRecord;

/// A service that turns a composed request into name records.
///
/// Each call is independent: implementations must not queue, deduplicate or
/// cancel concurrent calls. An empty or missing payload is `Ok(vec![])`.
#[async_trait]
pub trait NameGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<NameRecord>, GenerationError>;
}

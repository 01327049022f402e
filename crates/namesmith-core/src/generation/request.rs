//! Generation request model.

use serde::Serialize;

use crate::name::Gender;

/// One "generate names" call, as composed from the current preferences.
///
/// The structured fields echo what the instruction text already says so
/// generators and logs can inspect them without parsing prose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    /// Natural-language instruction sent to the model.
    pub instruction: String,
    /// Output schema the response must conform to.
    pub response_schema: serde_json::Value,
    /// Number of names requested.
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_letter: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

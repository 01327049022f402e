//! Talks to the external generation service.
//!
//! [`RequestComposer`] turns preferences into an instruction plus response
//! schema; [`GeminiNameGenerator`] sends it to the Gemini REST API and parses
//! the structured reply.

pub mod composer;
pub mod gemini;

pub use composer::{RequestComposer, name_list_schema};
pub use gemini::GeminiNameGenerator;

//! GeminiNameGenerator - Direct REST API implementation for Gemini.
//!
//! Sends one `generateContent` call per request with a JSON response schema
//! and parses the returned text into name records.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use namesmith_core::config::{DEFAULT_GEMINI_BASE_URL, GenerationConfig};
use namesmith_core::generation::{GenerationError, GenerationRequest, NameGenerator};
use namesmith_core::name::NameRecord;

const JSON_MIME_TYPE: &str = "application/json";

/// Generator implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiNameGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiNameGenerator {
    /// Creates a new generator with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    /// Builds a generator from the `[generation]` config table.
    ///
    /// No timeout is set unless `timeout_secs` is configured.
    pub fn from_config(
        config: &GenerationConfig,
        api_key: Option<String>,
    ) -> Result<Self, GenerationError> {
        let api_key = api_key.ok_or_else(|| {
            GenerationError::MissingCredential(
                "set GEMINI_API_KEY or add gemini.api_key to secret.json".to_string(),
            )
        })?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Points the generator at a different endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    async fn send_request(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<Option<String>, GenerationError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| GenerationError::Transport(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            GenerationError::MalformedPayload(format!("Failed to parse Gemini response: {err}"))
        })?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl NameGenerator for GeminiNameGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<NameRecord>, GenerationError> {
        tracing::debug!(
            model = %self.model,
            count = request.count,
            "[Gemini] Sending generateContent request"
        );

        let body = build_request_body(request);
        let text = self.send_request(&body).await?;
        let records = parse_records(text.as_deref())?;

        tracing::debug!(received = records.len(), "[Gemini] Parsed name records");
        Ok(records)
    }
}

fn build_request_body(request: &GenerationRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: request.instruction.clone(),
            }],
        }],
        generation_config: GenerationConfigBody {
            response_mime_type: JSON_MIME_TYPE,
            response_schema: request.response_schema.clone(),
        },
    }
}

/// Parses the model's text payload into records.
///
/// Missing, blank or `null` payloads are an empty list, not an error.
pub(crate) fn parse_records(text: Option<&str>) -> Result<Vec<NameRecord>, GenerationError> {
    let Some(text) = text else {
        return Ok(Vec::new());
    };

    let text = strip_code_fence(text.trim());
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| GenerationError::MalformedPayload(e.to_string()))?;

    if value.is_null() {
        return Ok(Vec::new());
    }

    serde_json::from_value(value).map_err(|e| GenerationError::SchemaViolation(e.to_string()))
}

/// Removes a surrounding Markdown code fence (```json ... ```), if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the language tag on the opening line.
    match body.find('\n') {
        Some(pos) => body[pos + 1..].trim(),
        None => body.trim(),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfigBody,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigBody {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
}

fn map_http_error(status: StatusCode, body: String) -> GenerationError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    GenerationError::Service {
        status: status.as_u16(),
        message,
    }
}

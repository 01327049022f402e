//! Configuration models.
//!
//! `AppConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Every field has a default so a partial file still loads.

use serde::{Deserialize, Serialize};

pub const DEFAULT_APP_NAME: &str = "namesmith";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TRADITION: &str = "Arabic";

/// Root of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Used in export file names and share texts.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            generation: GenerationConfig::default(),
        }
    }
}

/// `[generation]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Naming tradition mentioned in every instruction.
    #[serde(default = "default_tradition")]
    pub tradition: String,
    #[serde(default = "default_batch_size")]
    pub default_batch_size: u32,
    /// Reject a generation call while another one is still pending.
    #[serde(default)]
    pub single_flight: bool,
    /// Request timeout; unset means the HTTP client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            tradition: default_tradition(),
            default_batch_size: default_batch_size(),
            single_flight: false,
            timeout_secs: None,
        }
    }
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_tradition() -> String {
    DEFAULT_TRADITION.to_string()
}

fn default_batch_size() -> u32 {
    10
}

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [generation]
            tradition = "Persian"
            single_flight = true
            "#,
        )
        .unwrap();

        assert_eq!(config.app_name, "namesmith");
        assert_eq!(config.generation.tradition, "Persian");
        assert!(config.generation.single_flight);
        assert_eq!(config.generation.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.generation.default_batch_size, 10);
        assert_eq!(config.generation.timeout_secs, None);
    }

    #[test]
    fn test_empty_secret_has_no_gemini() {
        let secret: SecretConfig = serde_json::from_str("{}").unwrap();
        assert!(secret.gemini.is_none());
    }
}

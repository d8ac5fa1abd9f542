//! Setup flow - API key validation and config entry creation

use ai_core::{GeminiInferenceEngine, InferenceConfig, InferenceEngine, InferenceError};
use domain::OptionsMap;
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use super::form::{FieldKind, FormField};
use crate::config::{DEFAULT_ENTRY_NAME, EndpointsConfig, EntryConfig};

/// Reasons a setup submission is rejected
#[derive(Debug, Error)]
pub enum ConfigFlowError {
    /// The API could not be reached
    #[error("Unable to connect to Gemini API: {0}")]
    CannotConnect(String),

    /// The key was rejected or grants no TTS model
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    /// Anything else
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl ConfigFlowError {
    /// Form error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CannotConnect(_) => "cannot_connect",
            Self::InvalidApiKey(_) => "invalid_api_key",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<InferenceError> for ConfigFlowError {
    fn from(err: InferenceError) -> Self {
        if err.is_transport() {
            Self::CannotConnect(err.to_string())
        } else if err.is_unauthorized() {
            Self::InvalidApiKey(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

/// Submitted setup form
#[derive(Clone, Default, Deserialize)]
pub struct UserInput {
    pub api_key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stt_project_id: Option<String>,
    #[serde(default)]
    pub stt_credentials_json: Option<String>,
}

impl std::fmt::Debug for UserInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInput")
            .field("api_key", &"[REDACTED]")
            .field("name", &self.name)
            .field("stt_project_id", &self.stt_project_id)
            .field(
                "stt_credentials_json",
                &self.stt_credentials_json.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Entry produced by a successful setup
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    pub title: String,
    pub entry: EntryConfig,
    /// Stored options, empty until the options flow runs
    pub options: OptionsMap,
}

/// Check that `engine`'s key can list at least one TTS model
///
/// # Errors
///
/// `CannotConnect` on transport or server failures, `InvalidApiKey` when the
/// key is rejected or no TTS model is visible, `Unknown` otherwise.
pub async fn validate_api_key(engine: &dyn InferenceEngine) -> Result<(), ConfigFlowError> {
    let models = engine.list_models().await.map_err(|e| {
        error!(error = %e, "Unable to connect to Gemini API");
        ConfigFlowError::from(e)
    })?;

    if models.iter().any(|m| m.to_lowercase().contains("tts")) {
        Ok(())
    } else {
        warn!(models = models.len(), "No TTS models available with this API key");
        Err(ConfigFlowError::InvalidApiKey(
            "No TTS models available with this API key".to_string(),
        ))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// First step of adding the integration
#[derive(Debug, Clone, Default)]
pub struct SetupFlow {
    endpoints: EndpointsConfig,
}

impl SetupFlow {
    /// Create a flow validating against `endpoints`
    pub const fn new(endpoints: EndpointsConfig) -> Self {
        Self { endpoints }
    }

    /// Fields of the user step
    pub fn form(&self) -> Vec<FormField> {
        vec![
            FormField {
                key: "api_key",
                kind: FieldKind::Text {
                    secret: true,
                    multiline: false,
                },
                required: true,
                default: None,
            },
            FormField::optional(
                "name",
                FieldKind::Text {
                    secret: false,
                    multiline: false,
                },
                Value::String(DEFAULT_ENTRY_NAME.to_string()),
            ),
            FormField {
                key: "stt_project_id",
                kind: FieldKind::Text {
                    secret: false,
                    multiline: false,
                },
                required: false,
                default: None,
            },
            FormField {
                key: "stt_credentials_json",
                kind: FieldKind::Text {
                    secret: true,
                    multiline: true,
                },
                required: false,
                default: None,
            },
        ]
    }

    /// Validate the submitted form and build the config entry
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigFlowError`] whose [`code`](ConfigFlowError::code)
    /// is shown on the form.
    #[instrument(skip(self, input))]
    pub async fn submit(&self, input: UserInput) -> Result<ConfigEntry, ConfigFlowError> {
        let api_key = input.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigFlowError::InvalidApiKey(
                "API key is required".to_string(),
            ));
        }

        let engine = GeminiInferenceEngine::new(InferenceConfig {
            api_key: api_key.clone(),
            base_url: self.endpoints.gemini_base_url.clone(),
            timeout_ms: self.endpoints.timeout_ms,
            ..InferenceConfig::default()
        })
        .map_err(|e| ConfigFlowError::Unknown(e.to_string()))?;

        validate_api_key(&engine).await?;

        let title = non_blank(input.name).unwrap_or_else(|| DEFAULT_ENTRY_NAME.to_string());
        let entry = EntryConfig {
            api_key: Some(SecretString::from(api_key)),
            name: title.clone(),
            stt_project_id: non_blank(input.stt_project_id),
            stt_credentials_json: non_blank(input.stt_credentials_json).map(SecretString::from),
        };

        info!(title = %title, stt = entry.has_stt_credentials(), "Config entry created");
        Ok(ConfigEntry {
            title,
            entry,
            options: OptionsMap::new(),
        })
    }
}

//! Application configuration
//!
//! Split into focused sub-modules:
//! - `entry`: credentials and title captured by the setup flow
//!
//! Sources, in increasing precedence: built-in defaults, an optional
//! `config.toml`, then `GEMINI_ASSIST_*` environment variables where `__`
//! separates nesting levels (e.g. `GEMINI_ASSIST_ENTRY__API_KEY`).

mod entry;

use std::path::Path;

use ai_core::InferenceConfig;
use ai_speech::{SpeechConfig, SttProvider};
use domain::{EffectiveSettings, OptionsMap, retain_recognized};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

pub use entry::{DEFAULT_ENTRY_NAME, EntryConfig};

use crate::telemetry::LoggingConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "GEMINI_ASSIST";

/// Vendor endpoints and transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Generative Language API base URL
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Cloud Speech-to-Text base URL
    #[serde(default = "default_stt_base_url")]
    pub stt_base_url: String,

    /// Recognition backend
    #[serde(default)]
    pub stt_provider: SttProvider,

    /// Optional request timeout in milliseconds
    ///
    /// Unset by default, so vendor calls wait as long as the vendor takes.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_gemini_base_url() -> String {
    InferenceConfig::default().base_url
}

fn default_stt_base_url() -> String {
    SpeechConfig::default().stt_base_url
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            gemini_base_url: default_gemini_base_url(),
            stt_base_url: default_stt_base_url(),
            stt_provider: SttProvider::default(),
            timeout_ms: None,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Config entry credentials
    #[serde(default)]
    pub entry: EntryConfig,

    /// Stored integration options (unrecognised keys are ignored)
    #[serde(default)]
    pub options: OptionsMap,

    /// Vendor endpoints
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file, still honouring the environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("entry.name", DEFAULT_ENTRY_NAME)?
            .set_default("logging.filter", "info")?
            .add_source(file)
            // Override with environment variables (e.g., GEMINI_ASSIST_ENTRY__API_KEY)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let mut app: Self = config.try_deserialize()?;
        app.options = retain_recognized(&app.options);
        Ok(app)
    }

    /// Settings resolved from the stored options
    #[must_use]
    pub fn effective_settings(&self) -> EffectiveSettings {
        EffectiveSettings::resolve(&self.options)
    }

    /// Configuration for the conversation model client
    #[must_use]
    pub fn inference_config(&self) -> InferenceConfig {
        let settings = self.effective_settings();
        InferenceConfig {
            api_key: self.entry.api_key_str().unwrap_or_default().to_string(),
            base_url: self.endpoints.gemini_base_url.clone(),
            default_model: settings.conversation_model,
            timeout_ms: self.endpoints.timeout_ms,
            max_tokens: settings.conversation_max_tokens,
            temperature: settings.conversation_temperature,
        }
    }

    /// Configuration for the speech clients
    #[must_use]
    pub fn speech_config(&self) -> SpeechConfig {
        let settings = self.effective_settings();
        SpeechConfig {
            stt_provider: self.endpoints.stt_provider,
            gemini_api_key: self.entry.api_key_str().map(str::to_string),
            gemini_base_url: self.endpoints.gemini_base_url.clone(),
            tts_model: settings.model,
            default_voice: settings.voice,
            stt_base_url: self.endpoints.stt_base_url.clone(),
            stt_project_id: self.entry.stt_project_id.clone(),
            stt_credentials_json: self
                .entry
                .stt_credentials_json
                .as_ref()
                .map(|json| json.expose_secret().to_string()),
            stt_model: settings.stt_model,
            stt_language: settings.stt_language,
            timeout_ms: self.endpoints.timeout_ms,
            ..SpeechConfig::default()
        }
    }
}

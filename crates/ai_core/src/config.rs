//! Configuration for the Gemini inference client

use serde::{Deserialize, Serialize};

/// Configuration for the inference engine
#[derive(Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Generative Language API key
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the Generative Language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds; unset leaves vendor calls unbounded
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    ///
    /// Kept as `f64` so values like `0.7` serialize without rounding noise.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-pro-preview-06-05".to_string()
}

const fn default_max_tokens() -> u32 {
    1000
}

const fn default_temperature() -> f64 {
    0.7
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            default_model: default_model(),
            timeout_ms: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl InferenceConfig {
    /// Config for the given API key with every other field defaulted
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("API key is required".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }

        if self.timeout_ms == Some(0) {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

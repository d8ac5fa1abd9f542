//! Configuration for speech processing

use domain::catalog::{DEFAULT_MODEL_TTS, DEFAULT_STT_LANGUAGE, DEFAULT_STT_MODEL, DEFAULT_VOICE};
use serde::{Deserialize, Serialize};

/// Configuration for speech processing services
#[derive(Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Recognition backend
    #[serde(default)]
    pub stt_provider: SttProvider,

    /// Generative Language API key (synthesis and Gemini recognition)
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Generative Language API base URL
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Text-to-speech model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Default prebuilt voice for TTS
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Model used when recognition goes through Gemini
    #[serde(default = "default_gemini_stt_model")]
    pub gemini_stt_model: String,

    /// Cloud Speech-to-Text base URL
    #[serde(default = "default_stt_base_url")]
    pub stt_base_url: String,

    /// Google Cloud project id
    #[serde(default)]
    pub stt_project_id: Option<String>,

    /// Service-account credentials JSON
    #[serde(default)]
    pub stt_credentials_json: Option<String>,

    /// Cloud Speech recognition model
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// Cloud Speech recognition language
    #[serde(default = "default_stt_language")]
    pub stt_language: String,

    /// Request timeout in milliseconds; unset leaves vendor calls unbounded
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Recognition backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SttProvider {
    /// Google Cloud Speech-to-Text `speech:recognize`
    #[default]
    CloudSpeech,
    /// Inline audio sent to a Gemini model with a transcription prompt
    Gemini,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_tts_model() -> String {
    DEFAULT_MODEL_TTS.to_string()
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_gemini_stt_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_stt_base_url() -> String {
    "https://speech.googleapis.com/v1".to_string()
}

fn default_stt_model() -> String {
    DEFAULT_STT_MODEL.to_string()
}

fn default_stt_language() -> String {
    DEFAULT_STT_LANGUAGE.to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_provider: SttProvider::default(),
            gemini_api_key: None,
            gemini_base_url: default_gemini_base_url(),
            tts_model: default_tts_model(),
            default_voice: default_voice(),
            gemini_stt_model: default_gemini_stt_model(),
            stt_base_url: default_stt_base_url(),
            stt_project_id: None,
            stt_credentials_json: None,
            stt_model: default_stt_model(),
            stt_language: default_stt_language(),
            timeout_ms: None,
        }
    }
}

impl std::fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("SpeechConfig")
            .field("stt_provider", &self.stt_provider)
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("gemini_base_url", &self.gemini_base_url)
            .field("tts_model", &self.tts_model)
            .field("default_voice", &self.default_voice)
            .field("gemini_stt_model", &self.gemini_stt_model)
            .field("stt_base_url", &self.stt_base_url)
            .field("stt_project_id", &self.stt_project_id)
            .field("stt_credentials_json", &redact(&self.stt_credentials_json))
            .field("stt_model", &self.stt_model)
            .field("stt_language", &self.stt_language)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl SpeechConfig {
    /// Whether Cloud Speech recognition has both a project and credentials
    #[must_use]
    pub fn has_cloud_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.stt_project_id) && present(&self.stt_credentials_json)
    }

    /// Whether a speech-to-text backend can be built from this config
    #[must_use]
    pub fn stt_configured(&self) -> bool {
        match self.stt_provider {
            SttProvider::CloudSpeech => self.has_cloud_credentials(),
            SttProvider::Gemini => self.gemini_api_key.is_some(),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self
            .gemini_api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            return Err("Gemini API key must not be blank".to_string());
        }

        if self.timeout_ms == Some(0) {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.tts_model.trim().is_empty() {
            return Err("TTS model must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = SpeechConfig::default();

        assert_eq!(config.stt_provider, SttProvider::CloudSpeech);
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.tts_model, "gemini-2.5-flash-preview-tts");
        assert_eq!(config.default_voice, "Puck");
        assert_eq!(config.stt_base_url, "https://speech.googleapis.com/v1");
        assert_eq!(config.stt_model, "latest_long");
        assert_eq!(config.stt_language, "en-US");
        assert_eq!(config.timeout_ms, None);
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = SpeechConfig {
            timeout_ms: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_api_key() {
        let config = SpeechConfig {
            gemini_api_key: Some("  ".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn cloud_credentials_require_project_and_json() {
        let mut config = SpeechConfig {
            stt_project_id: Some("my-project".into()),
            ..Default::default()
        };
        assert!(!config.has_cloud_credentials());
        assert!(!config.stt_configured());

        config.stt_credentials_json = Some("{}".into());
        assert!(config.has_cloud_credentials());
        assert!(config.stt_configured());
    }

    #[test]
    fn gemini_stt_needs_only_api_key() {
        let config = SpeechConfig {
            stt_provider: SttProvider::Gemini,
            gemini_api_key: Some("k".into()),
            ..Default::default()
        };
        assert!(config.stt_configured());
    }

    #[test]
    fn provider_deserializes_snake_case() {
        let config: SpeechConfig =
            serde_json::from_str(r#"{"stt_provider":"gemini"}"#).unwrap();
        assert_eq!(config.stt_provider, SttProvider::Gemini);
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = SpeechConfig {
            gemini_api_key: Some("secret-key".into()),
            stt_credentials_json: Some("{\"private_key\":\"pem\"}".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key"));
        assert!(!debug.contains("private_key"));
    }
}

//! Config entry: the credentials captured by the setup flow.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Default title of a config entry
pub const DEFAULT_ENTRY_NAME: &str = "Gemini AI TTS";

/// Credentials and title of one configured integration
#[derive(Clone, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Generative Language API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Entry title
    #[serde(default = "default_name")]
    pub name: String,

    /// Google Cloud project for speech recognition
    #[serde(default)]
    pub stt_project_id: Option<String>,

    /// Service-account key JSON (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub stt_credentials_json: Option<SecretString>,
}

impl std::fmt::Debug for EntryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("name", &self.name)
            .field("stt_project_id", &self.stt_project_id)
            .field(
                "stt_credentials_json",
                &if self.stt_credentials_json.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .finish()
    }
}

fn default_name() -> String {
    DEFAULT_ENTRY_NAME.to_string()
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            name: default_name(),
            stt_project_id: None,
            stt_credentials_json: None,
        }
    }
}

impl EntryConfig {
    /// Get the API key as a string reference (for API calls)
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.trim().is_empty())
    }

    /// Get the credentials JSON as a string reference
    #[must_use]
    pub fn stt_credentials_str(&self) -> Option<&str> {
        self.stt_credentials_json
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|json| !json.trim().is_empty())
    }

    /// Whether both a project id and credentials are present
    #[must_use]
    pub fn has_stt_credentials(&self) -> bool {
        self.stt_project_id
            .as_deref()
            .is_some_and(|project| !project.trim().is_empty())
            && self.stt_credentials_str().is_some()
    }
}

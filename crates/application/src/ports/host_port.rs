//! Host port - Services provided by the home-automation host

use async_trait::async_trait;
use domain::OptionsMap;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Arguments of the host's `tts.speak` service
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakRequest {
    /// Target TTS entity
    pub entity_id: String,
    /// Text to speak
    pub message: String,
    /// Per-call TTS options
    pub options: OptionsMap,
}

/// Port for the host's text-to-speech service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HostTtsPort: Send + Sync {
    /// Ask the host to speak a message through a TTS entity
    async fn speak(&self, request: SpeakRequest) -> Result<(), ApplicationError>;
}

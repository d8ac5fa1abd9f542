//! Stand-in for the host's `tts.speak` service
//!
//! Routes speak requests to the integration's own TTS entity and writes the
//! resulting WAV to disk.

use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
};

use application::{
    ApplicationError, SpeechSynthesisService,
    ports::{HostTtsPort, SpeakRequest},
};
use async_trait::async_trait;
use domain::OptionKey;
use infrastructure::TTS_ENTITY_ID;
use tracing::info;

/// Host TTS service that renders into a WAV file
#[derive(Debug)]
pub struct WavFileHost {
    output: PathBuf,
    tts: OnceLock<Arc<SpeechSynthesisService>>,
}

impl WavFileHost {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            tts: OnceLock::new(),
        }
    }

    /// Attach the TTS entity created during setup
    pub fn attach(&self, tts: Arc<SpeechSynthesisService>) {
        // Setup runs once per process
        let _ = self.tts.set(tts);
    }
}

#[async_trait]
impl HostTtsPort for WavFileHost {
    async fn speak(&self, request: SpeakRequest) -> Result<(), ApplicationError> {
        if request.entity_id != TTS_ENTITY_ID {
            return Err(ApplicationError::ExternalService(format!(
                "Unknown TTS entity: {}",
                request.entity_id
            )));
        }
        let tts = self.tts.get().ok_or_else(|| {
            ApplicationError::Configuration("TTS entity not attached".to_string())
        })?;

        let language = request
            .options
            .get(OptionKey::Language.as_str())
            .and_then(|v| v.as_str());
        let audio = tts
            .get_tts_audio(&request.message, language, &request.options)
            .await?;

        tokio::fs::write(&self.output, &audio.data)
            .await
            .map_err(|e| ApplicationError::Internal(format!("Failed to write audio: {e}")))?;
        info!(path = %self.output.display(), bytes = audio.data.len(), "Audio written");
        Ok(())
    }
}

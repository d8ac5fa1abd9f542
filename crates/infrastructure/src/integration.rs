//! Integration lifecycle - Wires entities and services for one config entry
//!
//! `setup` resolves the stored options, builds the vendor adapters and
//! creates the conversation, TTS and (when credentials allow) STT entities.

use std::sync::Arc;

use application::{
    AgentRegistry, ConversationAgent, IntegrationServices, OptionsStore,
    SpeechRecognitionService, SpeechSynthesisService,
    error::ApplicationError,
    ports::{HostTtsPort, RecognitionPort},
};
use domain::OptionsMap;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::adapters::{GeminiInferenceAdapter, RecognitionAdapter, SpeechSynthesisAdapter};
use crate::config::AppConfig;

/// Unique id of the conversation entity
pub const CONVERSATION_UNIQUE_ID: &str = "gemini_ai_tts_conversation";
/// Unique id of the TTS entity
pub const TTS_UNIQUE_ID: &str = "gemini_ai_tts_tts";
/// Unique id of the STT entity
pub const STT_UNIQUE_ID: &str = "gemini_ai_tts_stt";

/// Entity id of the conversation agent
pub const CONVERSATION_ENTITY_ID: &str = "conversation.gemini_ai_tts";
/// Entity id of the TTS entity
pub const TTS_ENTITY_ID: &str = "tts.gemini_ai_tts";
/// Entity id of the STT entity
pub const STT_ENTITY_ID: &str = "stt.gemini_ai_tts";

/// Errors raised while setting up an entry
#[derive(Debug, Error)]
pub enum SetupError {
    /// The entry has no API key
    #[error("Config entry has no API key")]
    MissingApiKey,

    /// An adapter could not be built
    #[error("Failed to set up Gemini client: {0}")]
    Adapter(#[from] ApplicationError),
}

/// Kind of entity created by the integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Conversation,
    Tts,
    Stt,
}

/// Registered entity descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    pub kind: EntityKind,
    pub unique_id: &'static str,
    pub entity_id: &'static str,
    pub name: String,
}

/// A set-up config entry
pub struct Integration {
    config: AppConfig,
    host: Arc<dyn HostTtsPort>,
    options: Arc<OptionsStore>,
    agents: Arc<AgentRegistry>,
    conversation: Arc<ConversationAgent>,
    tts: Arc<SpeechSynthesisService>,
    stt: Option<Arc<SpeechRecognitionService>>,
    services: IntegrationServices,
}

impl std::fmt::Debug for Integration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Integration")
            .field("title", &self.config.entry.name)
            .field("agents", &self.agents.len())
            .field("stt", &self.stt.is_some())
            .finish_non_exhaustive()
    }
}

/// Build the recognition client, or `None` when the credentials are unusable
fn recognition_client(config: &AppConfig) -> Option<Arc<dyn RecognitionPort>> {
    match RecognitionAdapter::from_config(&config.speech_config()) {
        Ok(adapter) => Some(Arc::new(adapter)),
        Err(e) => {
            error!(error = %e, "Failed to initialize speech recognition client");
            None
        },
    }
}

impl Integration {
    /// Set up an entry
    ///
    /// # Errors
    ///
    /// Fails when the API key is missing or the Gemini adapters cannot be
    /// built. Bad STT credentials do not fail setup; the STT entity is then
    /// created without a client.
    #[instrument(skip(config, host), fields(title = %config.entry.name))]
    pub fn setup(config: AppConfig, host: Arc<dyn HostTtsPort>) -> Result<Self, SetupError> {
        if config.entry.api_key_str().is_none() {
            return Err(SetupError::MissingApiKey);
        }

        let options = Arc::new(OptionsStore::new(&config.options));

        let inference = Arc::new(GeminiInferenceAdapter::new(config.inference_config())?);
        let conversation = Arc::new(ConversationAgent::new(
            CONVERSATION_ENTITY_ID,
            inference,
            Arc::clone(&options),
        ));

        let synthesis = Arc::new(SpeechSynthesisAdapter::new(config.speech_config())?);
        let tts = Arc::new(SpeechSynthesisService::new(synthesis, Arc::clone(&options)));

        let stt = if config.speech_config().stt_configured() {
            Some(Arc::new(SpeechRecognitionService::new(
                recognition_client(&config),
                Arc::clone(&options),
            )))
        } else {
            warn!("Speech-to-text not configured, skipping STT entity");
            None
        };

        let agents = Arc::new(AgentRegistry::new());
        agents.register(Arc::clone(&conversation));
        let services = IntegrationServices::new(Arc::clone(&host), Arc::clone(&agents));

        info!(stt = stt.is_some(), "Integration set up");
        Ok(Self {
            config,
            host,
            options,
            agents,
            conversation,
            tts,
            stt,
            services,
        })
    }

    /// Tear down the entry, dropping conversation state
    pub fn unload(self) -> AppConfig {
        self.agents.clear();
        info!(title = %self.config.entry.name, "Integration unloaded");
        self.config
    }

    /// Set the entry up again with new stored options
    ///
    /// # Errors
    ///
    /// Same as [`Integration::setup`].
    pub fn reload(self, options: OptionsMap) -> Result<Self, SetupError> {
        let host = Arc::clone(&self.host);
        let mut config = self.unload();
        config.options = domain::retain_recognized(&options);
        Self::setup(config, host)
    }

    /// Entities created for this entry
    pub fn entities(&self) -> Vec<EntityInfo> {
        let name = &self.config.entry.name;
        let mut entities = vec![
            EntityInfo {
                kind: EntityKind::Conversation,
                unique_id: CONVERSATION_UNIQUE_ID,
                entity_id: CONVERSATION_ENTITY_ID,
                name: format!("{name} Conversation"),
            },
            EntityInfo {
                kind: EntityKind::Tts,
                unique_id: TTS_UNIQUE_ID,
                entity_id: TTS_ENTITY_ID,
                name: name.clone(),
            },
        ];
        if self.stt.is_some() {
            entities.push(EntityInfo {
                kind: EntityKind::Stt,
                unique_id: STT_UNIQUE_ID,
                entity_id: STT_ENTITY_ID,
                name: format!("{name} STT"),
            });
        }
        entities
    }

    /// Entry configuration
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared options store
    pub fn options(&self) -> Arc<OptionsStore> {
        Arc::clone(&self.options)
    }

    /// Conversation agent
    pub fn conversation(&self) -> Arc<ConversationAgent> {
        Arc::clone(&self.conversation)
    }

    /// TTS entity
    pub fn tts(&self) -> Arc<SpeechSynthesisService> {
        Arc::clone(&self.tts)
    }

    /// STT entity, present when STT credentials were configured
    pub fn stt(&self) -> Option<Arc<SpeechRecognitionService>> {
        self.stt.as_ref().map(Arc::clone)
    }

    /// Service handlers
    pub const fn services(&self) -> &IntegrationServices {
        &self.services
    }
}

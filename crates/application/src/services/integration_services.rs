//! Integration services - `speak_with_style`, `clear_conversation` and
//! `set_default_voice`

use std::{collections::BTreeMap, fmt, sync::Arc};

use domain::{
    ClearConversationCall, OptionKey, OptionsMap, ServiceCall, SetDefaultVoiceCall,
    SpeakWithStyleCall, format_dialogue,
};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{HostTtsPort, SpeakRequest},
    services::ConversationAgent,
};

/// Conversation agents registered by the integration, keyed by entity id
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: RwLock<BTreeMap<String, Arc<ConversationAgent>>>,
}

impl AgentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent under its entity id, replacing any previous one
    pub fn register(&self, agent: Arc<ConversationAgent>) {
        self.agents
            .write()
            .insert(agent.entity_id().to_string(), agent);
    }

    /// Look up an agent
    pub fn get(&self, entity_id: &str) -> Option<Arc<ConversationAgent>> {
        self.agents.read().get(entity_id).cloned()
    }

    /// Every registered agent
    pub fn all(&self) -> Vec<Arc<ConversationAgent>> {
        self.agents.read().values().cloned().collect()
    }

    /// Number of registered agents
    pub fn len(&self) -> usize {
        self.agents.read().len()
    }

    /// Check if no agent is registered
    pub fn is_empty(&self) -> bool {
        self.agents.read().is_empty()
    }

    /// Remove every agent
    pub fn clear(&self) {
        self.agents.write().clear();
    }
}

/// Handlers for the integration's host services
pub struct IntegrationServices {
    host_tts: Arc<dyn HostTtsPort>,
    agents: Arc<AgentRegistry>,
}

impl fmt::Debug for IntegrationServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegrationServices")
            .field("agents", &self.agents.len())
            .finish_non_exhaustive()
    }
}

impl IntegrationServices {
    /// Create the service handlers
    pub fn new(host_tts: Arc<dyn HostTtsPort>, agents: Arc<AgentRegistry>) -> Self {
        Self { host_tts, agents }
    }

    /// Validate and dispatch a call to the named service
    ///
    /// # Errors
    ///
    /// Returns a domain error for unknown services or invalid payloads and
    /// propagates failures of the host's TTS service.
    #[instrument(skip(self, payload))]
    pub async fn call(&self, name: &str, payload: Value) -> Result<(), ApplicationError> {
        match ServiceCall::parse(name, payload)? {
            ServiceCall::SpeakWithStyle(call) => self.speak_with_style(call).await,
            ServiceCall::ClearConversation(call) => {
                self.clear_conversation(&call);
                Ok(())
            },
            ServiceCall::SetDefaultVoice(call) => {
                self.set_default_voice(&call);
                Ok(())
            },
        }
    }

    /// Forward a styled message to the host's `tts.speak`
    ///
    /// # Errors
    ///
    /// Propagates the host's error.
    pub async fn speak_with_style(&self, call: SpeakWithStyleCall) -> Result<(), ApplicationError> {
        let mut options = OptionsMap::new();
        let fields = [
            (OptionKey::Voice, call.voice),
            (OptionKey::Style, call.style),
            (OptionKey::Emotion, call.emotion),
            (OptionKey::Pace, call.pace),
        ];
        for (key, value) in fields {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                options.insert(key.as_str().to_string(), Value::String(value));
            }
        }

        let message = match call.speakers {
            Some(speakers) if speakers.len() > 1 => {
                let formatted = format_dialogue(&call.message, &speakers);
                options.insert(OptionKey::MultiSpeaker.as_str().to_string(), Value::Bool(true));
                options.insert(
                    "speakers".to_string(),
                    Value::Array(speakers.into_iter().map(Value::String).collect()),
                );
                formatted
            },
            _ => call.message,
        };

        debug!(entity_id = %call.entity_id, options = ?options, "Forwarding to tts.speak");
        self.host_tts
            .speak(SpeakRequest {
                entity_id: call.entity_id,
                message,
                options,
            })
            .await
    }

    /// Clear the history of one agent, or of every registered agent
    ///
    /// Returns the number of agents cleared.
    pub fn clear_conversation(&self, call: &ClearConversationCall) -> usize {
        let agents = match &call.entity_id {
            Some(entity_id) => match self.agents.get(entity_id) {
                Some(agent) => vec![agent],
                None => {
                    warn!(entity_id = %entity_id, "No conversation agent with this entity id");
                    Vec::new()
                },
            },
            None => self.agents.all(),
        };

        for agent in &agents {
            agent.clear_history();
        }
        info!(cleared = agents.len(), "Conversation history cleared");
        agents.len()
    }

    /// Record a default-voice request
    ///
    /// The voice is validated but not persisted.
    pub fn set_default_voice(&self, call: &SetDefaultVoiceCall) {
        info!(
            "Setting default voice to {} for entity {}",
            call.voice,
            call.entity_id.as_deref().unwrap_or("all")
        );
    }
}

//! Conversation agent - Chat with a bounded transcript

use std::{fmt, sync::Arc, time::Instant};

use domain::catalog::CONVERSATION_LANGUAGES;
use domain::{ConversationHistory, ConversationId};
use parking_lot::Mutex;
use tracing::{debug, error, instrument};

use crate::{
    error::ApplicationError,
    ports::{GenerationRequest, InferencePort},
    services::{OptionsStore, dispatch::run_detached},
};

/// One user turn handed over by the host
#[derive(Debug, Clone, Default)]
pub struct ConversationInput {
    pub text: String,
    pub language: Option<String>,
    pub conversation_id: Option<String>,
}

impl ConversationInput {
    /// Input without language or conversation id
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Error codes an agent can report to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationErrorCode {
    Unknown,
}

impl ConversationErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
        }
    }
}

/// What the agent answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationResponse {
    /// Text to speak back
    Speech { text: String },
    /// The turn failed
    Error {
        code: ConversationErrorCode,
        message: String,
    },
}

/// Outcome of one processed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationResult {
    pub response: ConversationResponse,
    pub language: Option<String>,
    /// Caller's id, or a fresh one after a successful turn
    pub conversation_id: Option<String>,
}

impl ConversationResult {
    /// Spoken reply, if the turn succeeded
    pub fn speech(&self) -> Option<&str> {
        match &self.response {
            ConversationResponse::Speech { text } => Some(text),
            ConversationResponse::Error { .. } => None,
        }
    }
}

/// Chat agent backed by a Gemini text model
pub struct ConversationAgent {
    entity_id: String,
    inference: Arc<dyn InferencePort>,
    options: Arc<OptionsStore>,
    history: Mutex<ConversationHistory>,
}

impl fmt::Debug for ConversationAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationAgent")
            .field("entity_id", &self.entity_id)
            .field("history_len", &self.history.lock().len())
            .finish_non_exhaustive()
    }
}

impl ConversationAgent {
    /// Create an agent with an empty history
    pub fn new(
        entity_id: impl Into<String>,
        inference: Arc<dyn InferencePort>,
        options: Arc<OptionsStore>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            inference,
            options,
            history: Mutex::new(ConversationHistory::new()),
        }
    }

    /// Entity id the host addresses this agent by
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Languages the agent accepts
    pub const fn supported_languages(&self) -> &'static [&'static str] {
        CONVERSATION_LANGUAGES
    }

    /// Number of retained history entries
    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }

    /// Forget all previous turns
    pub fn clear_history(&self) {
        self.history.lock().clear();
        debug!(entity_id = %self.entity_id, "Conversation history cleared");
    }

    /// Process one user turn
    ///
    /// Failures never escape: they are logged and reported as an error
    /// response, leaving the history untouched.
    #[instrument(skip(self, input), fields(entity_id = %self.entity_id, text_len = input.text.len()))]
    pub async fn process(&self, input: ConversationInput) -> ConversationResult {
        match self.generate_reply(&input.text).await {
            Ok(reply) => {
                self.history.lock().record_exchange(input.text, reply.clone());
                ConversationResult {
                    response: ConversationResponse::Speech { text: reply },
                    language: input.language,
                    conversation_id: Some(
                        input
                            .conversation_id
                            .unwrap_or_else(|| ConversationId::generate().as_str().to_string()),
                    ),
                }
            },
            Err(e) => {
                error!(error = %e, "Error processing conversation");
                ConversationResult {
                    response: ConversationResponse::Error {
                        code: ConversationErrorCode::Unknown,
                        message: format!("Sorry, I encountered an error: {e}"),
                    },
                    language: input.language,
                    conversation_id: input.conversation_id,
                }
            },
        }
    }

    async fn generate_reply(&self, text: &str) -> Result<String, ApplicationError> {
        let settings = self.options.effective();
        let prompt = self
            .history
            .lock()
            .build_prompt(settings.conversation_context_length, text);

        let request = GenerationRequest {
            prompt,
            model: settings.conversation_model,
            temperature: settings.conversation_temperature,
            max_tokens: settings.conversation_max_tokens,
        };

        let start = Instant::now();
        let inference = Arc::clone(&self.inference);
        let result = run_detached(async move { inference.generate(request).await }).await?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms,
            "Conversation response generated"
        );

        Ok(result.content.trim().to_string())
    }
}

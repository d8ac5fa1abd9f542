//! Application services - Use case implementations

mod conversation_agent;
pub mod dispatch;
mod integration_services;
mod options_store;
mod speech_recognition;
mod speech_synthesis;

pub use conversation_agent::{
    ConversationAgent, ConversationErrorCode, ConversationInput, ConversationResponse,
    ConversationResult,
};
pub use integration_services::{AgentRegistry, IntegrationServices};
pub use options_store::OptionsStore;
pub use speech_recognition::{SpeechRecognitionService, recognition_settings};
pub use speech_synthesis::{SUPPORTED_TTS_OPTIONS, SpeechSynthesisService, TtsAudio};

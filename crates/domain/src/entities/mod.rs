//! Domain entities - Conversation transcript, speech styling and service calls

mod chat_message;
mod conversation;
mod multi_speaker;
mod service_calls;
mod speech;
mod speech_style;

pub use chat_message::{ChatMessage, MessageRole};
pub use conversation::{ConversationHistory, SYSTEM_PREAMBLE};
pub use multi_speaker::format_dialogue;
pub use service_calls::{
    ClearConversationCall, ServiceCall, ServiceName, SetDefaultVoiceCall, SpeakWithStyleCall,
};
pub use speech::{
    AUDIO_BIT_RATE, AudioChannels, AudioCodec, AudioContainer, AudioSampleRate, SpeechMetadata,
    SpeechResult, SpeechResultState,
};
pub use speech_style::{SpeechStyle, truncate_message};

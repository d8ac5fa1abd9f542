//! Integration service calls and their payload validation

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::catalog::{EMOTIONS, PACE_OPTIONS, SPEECH_STYLES, VOICES};
use crate::errors::DomainError;
use crate::value_objects::validate_entity_id;

/// Services registered by the integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    SpeakWithStyle,
    ClearConversation,
    SetDefaultVoice,
}

impl ServiceName {
    /// Every registered service
    pub const ALL: [Self; 3] = [
        Self::SpeakWithStyle,
        Self::ClearConversation,
        Self::SetDefaultVoice,
    ];

    /// Service name as exposed to the host
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SpeakWithStyle => "speak_with_style",
            Self::ClearConversation => "clear_conversation",
            Self::SetDefaultVoice => "set_default_voice",
        }
    }

    /// Look up a service by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl std::fmt::Display for ServiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of `speak_with_style`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SpeakWithStyleCall {
    pub message: String,
    #[validate(custom(function = "validate_entity_id"))]
    pub entity_id: String,
    #[serde(default)]
    #[validate(custom(function = "validate_voice"))]
    pub voice: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_style"))]
    pub style: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_emotion"))]
    pub emotion: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_pace"))]
    pub pace: Option<String>,
    /// A single name or a list of names
    #[serde(default, deserialize_with = "one_or_many")]
    pub speakers: Option<Vec<String>>,
}

/// Payload of `clear_conversation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ClearConversationCall {
    #[serde(default)]
    #[validate(custom(function = "validate_entity_id"))]
    pub entity_id: Option<String>,
}

/// Payload of `set_default_voice`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SetDefaultVoiceCall {
    #[validate(custom(function = "validate_voice"))]
    pub voice: String,
    #[serde(default)]
    #[validate(custom(function = "validate_entity_id"))]
    pub entity_id: Option<String>,
}

/// A validated service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    SpeakWithStyle(SpeakWithStyleCall),
    ClearConversation(ClearConversationCall),
    SetDefaultVoice(SetDefaultVoiceCall),
}

impl ServiceCall {
    /// Parse and validate the payload of the named service
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] for an unknown service and
    /// [`DomainError::InvalidServiceCall`] when the payload does not match
    /// the service schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::ServiceCall;
    /// use serde_json::json;
    ///
    /// let call = ServiceCall::parse(
    ///     "set_default_voice",
    ///     json!({ "voice": "Kore" }),
    /// ).unwrap();
    /// assert!(matches!(call, ServiceCall::SetDefaultVoice(_)));
    ///
    /// assert!(ServiceCall::parse("set_default_voice", json!({ "voice": "Nobody" })).is_err());
    /// ```
    pub fn parse(name: &str, payload: Value) -> Result<Self, DomainError> {
        let service =
            ServiceName::from_name(name).ok_or_else(|| DomainError::not_found("service", name))?;

        let payload = match payload {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };

        match service {
            ServiceName::SpeakWithStyle => decode(payload).map(Self::SpeakWithStyle),
            ServiceName::ClearConversation => decode(payload).map(Self::ClearConversation),
            ServiceName::SetDefaultVoice => decode(payload).map(Self::SetDefaultVoice),
        }
    }

    /// Name of the service this call targets
    pub const fn name(&self) -> ServiceName {
        match self {
            Self::SpeakWithStyle(_) => ServiceName::SpeakWithStyle,
            Self::ClearConversation(_) => ServiceName::ClearConversation,
            Self::SetDefaultVoice(_) => ServiceName::SetDefaultVoice,
        }
    }
}

fn decode<T>(payload: Value) -> Result<T, DomainError>
where
    T: for<'de> Deserialize<'de> + Validate,
{
    let call: T = serde_json::from_value(payload)
        .map_err(|e| DomainError::InvalidServiceCall(e.to_string()))?;
    call.validate()
        .map_err(|e| DomainError::InvalidServiceCall(e.to_string()))?;
    Ok(call)
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(
        Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
            OneOrMany::One(name) => vec![name],
            OneOrMany::Many(names) => names,
        }),
    )
}

fn member_of(field: &'static str, value: &str, allowed: bool) -> Result<(), ValidationError> {
    if allowed {
        Ok(())
    } else {
        Err(ValidationError::new(field).with_message(format!("unsupported {field}: {value}").into()))
    }
}

fn validate_voice(voice: &str) -> Result<(), ValidationError> {
    member_of("voice", voice, VOICES.contains(voice))
}

fn validate_style(style: &str) -> Result<(), ValidationError> {
    member_of("style", style, SPEECH_STYLES.contains(&style))
}

fn validate_emotion(emotion: &str) -> Result<(), ValidationError> {
    member_of("emotion", emotion, EMOTIONS.contains(&emotion))
}

fn validate_pace(pace: &str) -> Result<(), ValidationError> {
    member_of("pace", pace, PACE_OPTIONS.contains(&pace))
}

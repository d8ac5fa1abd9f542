//! Host entity identifier with validation
//!
//! # Examples
//!
//! ```
//! use domain::EntityId;
//!
//! let id = EntityId::new("tts.gemini_ai_tts").unwrap();
//! assert_eq!(id.platform(), "tts");
//! assert_eq!(id.object_id(), "gemini_ai_tts");
//!
//! assert!(EntityId::new("not an entity").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::DomainError;

/// A validated `<platform>.<object_id>` identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct EntityId {
    #[validate(custom(function = "validate_entity_id"))]
    value: String,
}

impl EntityId {
    /// Create an entity id, validating the format
    ///
    /// # Errors
    ///
    /// Returns an error unless the id is two lowercase `[a-z0-9_]` segments
    /// joined by a single dot.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let candidate = Self {
            value: id.into().trim().to_string(),
        };
        candidate
            .validate()
            .map_err(|e| DomainError::InvalidEntityId(e.to_string()))?;

        Ok(candidate)
    }

    /// Get the entity id as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Platform part (before the dot)
    pub fn platform(&self) -> &str {
        self.value.split('.').next().unwrap_or("")
    }

    /// Object part (after the dot)
    pub fn object_id(&self) -> &str {
        self.value.split('.').nth(1).unwrap_or("")
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Validate the `<platform>.<object_id>` format
pub fn validate_entity_id(value: &str) -> Result<(), ValidationError> {
    let segment_ok = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    };

    match value.split_once('.') {
        Some((platform, object)) if segment_ok(platform) && segment_ok(object) => Ok(()),
        _ => Err(ValidationError::new("entity_id")
            .with_message(format!("invalid entity id: {value}").into())),
    }
}

//! Domain layer for the Gemini voice assistant integration
//!
//! Holds the static catalogs, settings resolution, the conversation
//! transcript, speech styling and the service-call payloads. Nothing in this
//! crate performs I/O.

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod settings;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use settings::{EffectiveSettings, OptionKey, OptionsMap, VoiceSelection, retain_recognized};
pub use value_objects::*;

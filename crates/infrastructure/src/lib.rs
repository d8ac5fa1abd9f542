//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the Gemini and Cloud Speech adapters, configuration loading,
//! the setup/options flows, logging and the integration lifecycle.

pub mod adapters;
pub mod config;
pub mod config_flow;
pub mod integration;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DEFAULT_ENTRY_NAME, EndpointsConfig, EntryConfig};
pub use config_flow::{
    ConfigEntry, ConfigFlowError, FieldKind, FormField, OptionsFlow, OptionsStep, SetupFlow,
    UserInput, validate_api_key,
};
pub use integration::{
    CONVERSATION_ENTITY_ID, CONVERSATION_UNIQUE_ID, EntityInfo, EntityKind, Integration,
    STT_ENTITY_ID, STT_UNIQUE_ID, SetupError, TTS_ENTITY_ID, TTS_UNIQUE_ID,
};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};

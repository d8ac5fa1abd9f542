//! Setup and options flows
//!
//! The setup flow validates an API key against the model listing and turns
//! the submitted form into a config entry. The options flow renders one
//! menu screen at a time, pre-filled with the effective settings, and merges
//! submitted values into the stored options.

mod form;
mod options;
mod setup;

pub use form::{FieldKind, FormField};
pub use options::{OptionsFlow, OptionsStep};
pub use setup::{ConfigEntry, ConfigFlowError, SetupFlow, UserInput, validate_api_key};

//! Stored integration options
//!
//! Holds the options mapping of the config entry. Effective settings are
//! resolved from it on every request and never cached.

use domain::{EffectiveSettings, OptionsMap, retain_recognized};

/// Shared options of one config entry
///
/// Immutable for the lifetime of a setup; new options arrive through a reload.
#[derive(Debug, Default)]
pub struct OptionsStore {
    options: OptionsMap,
}

impl OptionsStore {
    /// Create a store holding the recognised keys of `options`
    pub fn new(options: &OptionsMap) -> Self {
        Self {
            options: retain_recognized(options),
        }
    }

    /// Copy of the stored options
    pub fn snapshot(&self) -> OptionsMap {
        self.options.clone()
    }

    /// Settings resolved from the current options
    pub fn effective(&self) -> EffectiveSettings {
        EffectiveSettings::resolve(&self.options)
    }
}

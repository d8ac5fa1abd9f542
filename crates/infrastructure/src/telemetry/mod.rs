//! Logging infrastructure
//!
//! Console logging through `tracing-subscriber`, either human-readable or
//! JSON lines. `RUST_LOG` takes precedence over the configured filter.

mod logging;

pub use logging::{LoggingConfig, TelemetryError, init_logging};

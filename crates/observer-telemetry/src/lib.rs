//! # Observer Telemetry
//!
//! Structured logging for the chain observer.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use observer_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     // Logs are now being collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OBSERVER_SERVICE_NAME` | `net-observer` | Service name in logs |
//! | `OBSERVER_LOG_LEVEL` | `info` | Log filter, falls back to `RUST_LOG` |
//! | `OBSERVER_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `OBSERVER_JSON_LOGS` | `false` | JSON lines instead of pretty output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for the process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_logging(config)
}

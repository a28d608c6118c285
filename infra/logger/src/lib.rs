//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for `PinVault` binaries.
//!
//! * Console output is compact and goes to **stderr**, keeping stdout clean for command
//!   results.
//! * Optional rolling log files through a non-blocking writer, plain text or JSON lines.
//! * Filtering starts at the configured level and honours `RUST_LOG`, or an explicit
//!   directive set with [`LoggerBuilder::env_filter`].
//!
//! Nothing in the workspace logs PINs, keys or plaintext; the logger adds no redaction
//! of its own.
//!
//! ## Example
//!
//! ```rust
//! # use pinvault_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("pinvault")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod builder;
mod error;

pub use crate::builder::{LoggerBuilder, NoFile, NoName, WithFile, WithName};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::marker::PhantomData;
use tracing_appender::non_blocking::WorkerGuard;

/// A handle to the initialized logging system.
///
/// Holds the background writer guard; drop it only at shutdown.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    ///
    /// The `name` prefixes rolling log files (e.g. `pinvault.2026-10-19.log`).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: builder::LoggerConfig::default(), name: NoName, file_state: PhantomData }
    }

    /// Returns the file writer guard, if file logging is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Logging system shutting down, flushing buffers...");
        }
    }
}

/// Parses a level name such as `"info"` or `"debug"` (case-insensitive).
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse::<LevelFilter>().map_err(|_| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{level}'").into(),
        context: Some("expected one of off, error, warn, info, debug, trace".into()),
    })
}

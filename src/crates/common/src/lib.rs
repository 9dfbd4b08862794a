//! OS error formatting and string helpers
//!
//! This crate collects the small, pure helpers that diagnostics code needs
//! everywhere: turning OS error codes into readable text, carrying and logging
//! chained errors, and rendering identifiers, addresses and timestamps.
//!
//! # Modules
//!
//! - `error` - System error messages, operation errors with cause chains, unwinding into a log sink
//! - `string` - GUID/SID/IP/time formatting and general string helpers
//! - `logging` - The log sink interface and a `tracing` backed sink
//! - `config` - Formatting defaults loaded from the environment or a config file

pub mod config;
pub mod error;
pub mod logging;
pub mod string;

use thiserror::Error;

pub use error::OperationError;
pub use logging::{LogSink, TracingSink};

/// Errors that can occur in the common crate
#[derive(Debug, Error)]
pub enum CommonError {
    /// A GUID or SID could not be formatted
    #[error("Format error: {0}")]
    Format(String),

    /// A FILETIME could not be converted to a calendar time
    #[error("Time conversion error: {0}")]
    TimeConversion(String),

    /// A caller supplied argument violated a constraint
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// A system call failed
    #[error(transparent)]
    Operation(#[from] OperationError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for common operations
pub type Result<T> = std::result::Result<T, CommonError>;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Logging utilities
//!
//! Defines the [`LogSink`] collaborator that error unwinding writes into, and
//! [`TracingSink`], which forwards everything to `tracing`.

use std::sync::Mutex;
use thiserror::Error;
use tracing::error;

/// Default `tracing` target used by [`TracingSink`]
pub const DEFAULT_TARGET: &str = "common";

/// A sink failed to accept a message
#[derive(Debug, Error)]
#[error("Log sink error: {0}")]
pub struct SinkError(pub String);

/// Destination for error-severity diagnostics
///
/// This is the only capability error unwinding needs. Implementations decide
/// where the text goes; a failed write is reported through [`SinkError`] and
/// callers on best-effort paths are free to discard it.
///
/// # Example
///
/// ```rust
/// use common::logging::{LogSink, SinkError};
///
/// struct Stderr;
///
/// impl LogSink for Stderr {
///     fn error(&self, message: &str) -> Result<(), SinkError> {
///         eprintln!("{}", message);
///         Ok(())
///     }
/// }
/// ```
pub trait LogSink {
    /// Record a message at error severity
    fn error(&self, message: &str) -> Result<(), SinkError>;
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn error(&self, message: &str) -> Result<(), SinkError> {
        (**self).error(message)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn error(&self, message: &str) -> Result<(), SinkError> {
        (**self).error(message)
    }
}

impl<S: LogSink + ?Sized> LogSink for std::sync::Arc<S> {
    fn error(&self, message: &str) -> Result<(), SinkError> {
        (**self).error(message)
    }
}

/// Sink that emits every message as a `tracing` error event
#[derive(Debug, Clone)]
pub struct TracingSink {
    target: String,
}

impl TracingSink {
    /// Create a sink using [`DEFAULT_TARGET`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag events with a custom target name
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Target name attached to emitted events
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
        }
    }
}

impl LogSink for TracingSink {
    fn error(&self, message: &str) -> Result<(), SinkError> {
        // tracing targets must be static, the configured one travels as a field
        error!(sink = %self.target, "{}", message);
        Ok(())
    }
}

/// Sink that keeps messages in memory
///
/// Handy for tests and for collecting a chain before handing it to a UI.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded messages, oldest first
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of recorded messages
    pub fn len(&self) -> usize {
        self.messages().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn error(&self, message: &str) -> Result<(), SinkError> {
        self.messages
            .lock()
            .map_err(|e| SinkError(e.to_string()))?
            .push(message.to_string());
        Ok(())
    }
}

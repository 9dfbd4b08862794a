//! Error handling utilities
//!
//! Translates OS error codes into readable text and carries failed
//! operations as chained errors that can be unwound into a log sink.
//!
//! # Features
//!
//! - `format_system_error` with a `System error 0x%08x` fallback, narrow or wide
//! - `OperationError` with an explicit cause chain
//! - `ErrorContext` trait for wrapping a failing `Result`
//! - `unwind_and_log` plus chain formatting and root cause helpers
//!
//! # Example
//!
//! ```rust
//! use common::error::{unwind_and_log, ErrorContext};
//! use common::logging::MemorySink;
//!
//! fn load() -> Result<String, common::OperationError> {
//!     std::fs::read_to_string("/nonexistent/settings.ini").os_context("ReadFile", 2)
//! }
//!
//! let sink = MemorySink::new();
//! if let Err(e) = load() {
//!     unwind_and_log(&e, &sink);
//! }
//! assert_eq!(sink.len(), 2);
//! ```

mod chain;
mod system;

pub use chain::{
    error_chain_length, format_error_chain, raise_operation_error, root_cause, unwind_and_log,
    ErrorContext, OperationError,
};
pub use system::{
    fallback_message, format_system_error, format_system_error_as, format_system_error_from,
    format_system_error_wide, MessageSource, Narrow, OsMessageSource, TextEncoding, Wide,
};

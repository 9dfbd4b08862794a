//! Operation errors and cause chains
//!
//! Provides the chained [`OperationError`], helpers for attaching it to a
//! failing `Result`, and routines that walk and log error chains.

use std::error::Error as StdError;
use std::fmt;
use std::iter;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use super::system::{format_system_error_from, MessageSource, Narrow, OsMessageSource};
use crate::logging::LogSink;

type BoxError = Box<dyn StdError + Send + Sync>;

/// A failed operation, optionally wrapping the error that was in flight
///
/// The message reads `"<operation>: <system message>"` when built from an
/// OS error code.
#[derive(Debug)]
pub struct OperationError {
    message: String,
    code: Option<u32>,
    cause: Option<BoxError>,
}

impl OperationError {
    /// Describe `operation` failing with OS error `code`
    pub fn new(operation: &str, code: u32) -> Self {
        Self::with_message_source(&OsMessageSource, operation, code)
    }

    /// [`OperationError::new`] with a custom message source
    pub fn with_message_source<M>(source: &M, operation: &str, code: u32) -> Self
    where
        M: MessageSource + ?Sized,
    {
        Self {
            message: format!(
                "{}: {}",
                operation,
                format_system_error_from::<Narrow, _>(source, code)
            ),
            code: Some(code),
            cause: None,
        }
    }

    /// An operation error with a ready-made message and no code
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            cause: None,
        }
    }

    /// Chain `cause` underneath this error
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Full message, without causes
    pub fn message(&self) -> &str {
        &self.message
    }

    /// OS error code, when built from one
    pub fn code(&self) -> Option<u32> {
        self.code
    }

    /// The wrapped error, if any
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for OperationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

/// Fail with an [`OperationError`] for `operation` and OS error `code`
///
/// Never returns `Ok`. To keep an error that is already propagating, chain it
/// with [`OperationError::with_cause`] or [`ErrorContext::os_context`].
///
/// ```rust
/// use common::error::raise_operation_error;
///
/// fn open() -> Result<(), common::OperationError> {
///     raise_operation_error("CreateFile", 2)
/// }
///
/// let err = open().unwrap_err();
/// assert!(err.to_string().starts_with("CreateFile: "));
/// ```
pub fn raise_operation_error<T>(operation: &str, code: u32) -> Result<T, OperationError> {
    Err(OperationError::new(operation, code))
}

/// Trait for chaining an [`OperationError`] on top of a failing result
///
/// The failing error is kept unmodified as the cause.
///
/// ```rust
/// use common::error::ErrorContext;
/// use std::error::Error;
///
/// let read: Result<(), std::io::Error> = Err(std::io::ErrorKind::NotFound.into());
/// let err = read.os_context("ReadFile", 38).unwrap_err();
///
/// assert!(err.to_string().starts_with("ReadFile: "));
/// assert!(err.source().is_some());
/// ```
pub trait ErrorContext<T> {
    /// Wrap the error under a plain context message
    fn context(self, msg: impl Into<String>) -> Result<T, OperationError>;

    /// Wrap the error under a lazily built context message
    fn with_context<F>(self, f: F) -> Result<T, OperationError>
    where
        F: FnOnce() -> String;

    /// Wrap the error under `"<operation>: <system message>"`
    fn os_context(self, operation: &str, code: u32) -> Result<T, OperationError>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T, OperationError> {
        self.map_err(|e| OperationError::from_message(msg).with_cause(e))
    }

    fn with_context<F>(self, f: F) -> Result<T, OperationError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| OperationError::from_message(f()).with_cause(e))
    }

    fn os_context(self, operation: &str, code: u32) -> Result<T, OperationError> {
        self.map_err(|e| OperationError::new(operation, code).with_cause(e))
    }
}

/// Log an error and each of its causes, outermost first
///
/// Every element of the chain is written to `sink` once at error severity.
/// This is a best-effort path: a failing or panicking sink, or a panic while
/// reading a cause, ends the walk quietly. Returns how many messages the sink
/// accepted.
pub fn unwind_and_log<S>(error: &(dyn StdError + 'static), sink: &S) -> usize
where
    S: LogSink + ?Sized,
{
    let mut logged = 0;
    let mut current = Some(error);

    while let Some(err) = current {
        match panic::catch_unwind(AssertUnwindSafe(|| sink.error(&err.to_string()))) {
            Ok(Ok(())) => logged += 1,
            Ok(Err(sink_error)) => {
                debug!("Discarding log sink failure while unwinding: {}", sink_error);
                break;
            }
            Err(_) => {
                debug!("Discarding log sink panic while unwinding");
                break;
            }
        }

        current = match panic::catch_unwind(AssertUnwindSafe(|| err.source())) {
            Ok(next) => next,
            Err(_) => {
                debug!("Discarding panic while reading an error cause");
                None
            }
        };
    }

    logged
}

/// `error` followed by each of its causes
fn walk_chain<'a>(error: &'a dyn StdError) -> impl Iterator<Item = &'a dyn StdError> {
    iter::successors(Some(error), |&err| {
        err.source().map(|cause| cause as &dyn StdError)
    })
}

/// Render an error and its causes one per line
///
/// The first line reads `Error: <message>`; each cause follows as
/// `Caused by: <message>`, indented two spaces deeper than the one before.
pub fn format_error_chain(error: &dyn StdError) -> String {
    walk_chain(error)
        .enumerate()
        .map(|(depth, err)| match depth {
            0 => format!("Error: {}", err),
            _ => format!("{:indent$}Caused by: {}", "", err, indent = depth * 2),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Innermost error of the chain, `error` itself when it has no cause
pub fn root_cause(error: &dyn StdError) -> &dyn StdError {
    walk_chain(error).last().unwrap_or(error)
}

/// Number of errors in the chain, counting `error` itself
pub fn error_chain_length(error: &dyn StdError) -> usize {
    walk_chain(error).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{MemorySink, SinkError};
    use crate::CommonError;
    use std::cell::Cell;

    struct FixedSource;

    impl MessageSource for FixedSource {
        fn message(&self, code: u32) -> Option<String> {
            match code {
                5 => Some("Access is denied.\r\n".to_string()),
                _ => None,
            }
        }
    }

    fn inner_operation() -> Result<(), std::io::Error> {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ))
    }

    fn middle_operation() -> Result<(), OperationError> {
        inner_operation().context("Failed to read configuration")
    }

    fn outer_operation() -> Result<(), OperationError> {
        middle_operation().map_err(|e| {
            OperationError::with_message_source(&FixedSource, "OpenProcess", 5).with_cause(e)
        })
    }

    #[test]
    fn test_operation_error_message() {
        let err = OperationError::with_message_source(&FixedSource, "OpenProcess", 5);
        assert_eq!(err.to_string(), "OpenProcess: Access is denied.");
        assert_eq!(err.code(), Some(5));
        assert!(err.source().is_none());

        let err = OperationError::with_message_source(&FixedSource, "DeviceIoControl", 0x57);
        assert_eq!(err.to_string(), "DeviceIoControl: System error 0x00000057");
    }

    #[test]
    fn test_raise_operation_error_always_fails() {
        let result: Result<u32, OperationError> = raise_operation_error("CloseHandle", 6);
        let err = result.unwrap_err();
        assert!(err.message().starts_with("CloseHandle: "));
        assert!(err.cause().is_none());
    }

    #[test]
    fn test_cause_is_preserved() {
        let in_flight = CommonError::Argument("budget".to_string());
        let err = OperationError::with_message_source(&FixedSource, "OpenProcess", 5)
            .with_cause(in_flight);

        let cause = err.source().expect("cause");
        let kept = cause.downcast_ref::<CommonError>().expect("cause type");
        assert!(matches!(kept, CommonError::Argument(msg) if msg == "budget"));
    }

    #[test]
    fn test_error_context() {
        let err = inner_operation().context("Operation failed").unwrap_err();
        assert_eq!(err.to_string(), "Operation failed");
        assert_eq!(err.source().unwrap().to_string(), "File not found");
    }

    #[test]
    fn test_error_with_context() {
        let err = inner_operation()
            .with_context(|| format!("Failed at {}", "location"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed at location");
    }

    #[test]
    fn test_os_context_wraps_in_flight_error() {
        let err = inner_operation().os_context("ReadFile", 38).unwrap_err();
        assert!(err.to_string().starts_with("ReadFile: "));
        assert_eq!(err.code(), Some(38));

        let cause = err.source().unwrap();
        let io = cause.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_unwind_and_log_outermost_first() {
        let error = outer_operation().unwrap_err();
        let sink = MemorySink::new();

        let logged = unwind_and_log(&error, &sink);

        assert_eq!(logged, 3);
        assert_eq!(
            sink.messages(),
            vec![
                "OpenProcess: Access is denied.",
                "Failed to read configuration",
                "File not found",
            ]
        );
    }

    #[test]
    fn test_unwind_and_log_without_cause() {
        let error = OperationError::from_message("single");
        let sink = MemorySink::new();

        assert_eq!(unwind_and_log(&error, &sink), 1);
        assert_eq!(sink.messages(), vec!["single"]);
    }

    struct FailingSink {
        calls: Cell<usize>,
        fail_on: usize,
    }

    impl LogSink for FailingSink {
        fn error(&self, _message: &str) -> Result<(), SinkError> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call == self.fail_on {
                return Err(SinkError("broken pipe".to_string()));
            }
            Ok(())
        }
    }

    struct PanickingSink;

    impl LogSink for PanickingSink {
        fn error(&self, _message: &str) -> Result<(), SinkError> {
            panic!("sink exploded");
        }
    }

    #[test]
    fn test_unwind_and_log_sink_failure_is_swallowed() {
        let error = outer_operation().unwrap_err();
        let sink = FailingSink {
            calls: Cell::new(0),
            fail_on: 2,
        };

        assert_eq!(unwind_and_log(&error, &sink), 1);
        assert_eq!(sink.calls.get(), 2);
    }

    #[derive(Debug)]
    struct UnreadableCause;

    impl fmt::Display for UnreadableCause {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "TerminateProcess: Access is denied.")
        }
    }

    impl StdError for UnreadableCause {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            panic!("cause storage corrupted");
        }
    }

    #[test]
    fn test_unwind_and_log_cause_panic_is_swallowed() {
        let sink = MemorySink::new();

        let logged = unwind_and_log(&UnreadableCause, &sink);

        assert_eq!(logged, 1);
        assert_eq!(sink.messages(), vec!["TerminateProcess: Access is denied."]);
    }

    #[test]
    fn test_unwind_and_log_stops_at_unreadable_cause() {
        let error = OperationError::from_message("StartService failed").with_cause(UnreadableCause);
        let sink = MemorySink::new();

        assert_eq!(unwind_and_log(&error, &sink), 2);
        assert_eq!(
            sink.messages(),
            vec!["StartService failed", "TerminateProcess: Access is denied."]
        );
    }

    #[test]
    fn test_unwind_and_log_sink_panic_is_swallowed() {
        let error = outer_operation().unwrap_err();
        assert_eq!(unwind_and_log(&error, &PanickingSink), 0);
    }

    #[test]
    fn test_format_error_chain() {
        let error = outer_operation().unwrap_err();
        let formatted = format_error_chain(&error);

        assert_eq!(
            formatted,
            "Error: OpenProcess: Access is denied.\n  Caused by: Failed to read configuration\n    Caused by: File not found"
        );
    }

    #[test]
    fn test_root_cause() {
        let error = outer_operation().unwrap_err();
        assert_eq!(root_cause(&error).to_string(), "File not found");
    }

    #[test]
    fn test_error_chain_length() {
        let error = outer_operation().unwrap_err();
        // OpenProcess -> read config -> file not found
        assert_eq!(error_chain_length(&error), 3);
    }

    #[test]
    fn test_single_error_chain() {
        let error = CommonError::Argument("single error".to_string());
        let formatted = format_error_chain(&error);

        assert_eq!(formatted, "Error: Invalid argument: single error");
        assert_eq!(error_chain_length(&error), 1);
        assert_eq!(root_cause(&error).to_string(), "Invalid argument: single error");
    }
}

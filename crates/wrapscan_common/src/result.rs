//! Common result and error types for the Wrapscan toolkit.

/// The standard result type for fallible internal operations.
///
/// `Ok` contains the result value (which may be partial or degraded after
/// error recovery). `Err` indicates an unrecoverable internal error (a bug
/// in Wrapscan), not a user-facing problem. User-facing issues such as
/// malformed netlist elements are reported through the diagnostics sink, and
/// the operation still returns `Ok`.
pub type WrapscanResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in Wrapscan, not a user input problem.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

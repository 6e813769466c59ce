//! Error types for the interop layer
//!
//! Native call failures and handle misuse are reported through these values.
//! Converter contract violations are not errors: they are debug assertions.

use std::fmt;

/// Result type for interop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Interop errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Native backend rejected the call (HRESULT text in the message)
    BackendError(String),

    /// Native backend ran out of memory
    OutOfMemory,

    /// Invalid descriptor or native object
    InvalidResource(String),

    /// Handle is unknown, stale or null
    InvalidHandle(String),

    /// Native object is already registered under a live handle
    AlreadyRegistered(String),

    /// Operation not allowed on this object (e.g. clear on a recorded command list)
    InvalidOperation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidHandle(msg) => write!(f, "Invalid handle: {}", msg),
            Error::AlreadyRegistered(msg) => write!(f, "Already registered: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

//! Error types for the Mosaic shader library
//!
//! Builder invariant violations never surface here: they poison the builder
//! (see `shader::FailureReason`). This module covers the fallible operations
//! around it, mainly shader object creation and buffer layout.

use std::fmt;

/// Result type for Mosaic operations
pub type Result<T> = std::result::Result<T, Error>;

/// Mosaic errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (raised by a shader object factory or update step)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (wrong shader object type, bad handle, etc.)
    InvalidResource(String),

    /// Variable or buffer layout could not be computed
    InvalidLayout(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidLayout(msg) => write!(f, "Invalid layout: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an `Error::BackendError`, logging it with file:line information
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("mosaic::ShaderObjectStore", "Factory failed: {}", reason);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::mosaic::Engine::log_detailed(
            $crate::mosaic::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::mosaic::Error::BackendError(message)
    }};
}

/// Log an error and return early with `Error::BackendError`
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

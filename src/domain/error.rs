//! Error types for the toaster crate.
//!
//! This module defines the centralized error type [`ToasterError`] and a type alias
//! [`Result`] for the fallible edges of the engine: configuration, themes, decoding
//! wire signals, and attaching surfaces to a bus. The toast state machine itself
//! never fails; unknown identifiers are treated as no-ops.

use thiserror::Error;

/// The main error type for toaster operations.
///
/// # Examples
///
/// ```
/// use toaster::ToasterError;
///
/// fn validate_display_time(ms: u64) -> Result<(), ToasterError> {
///     if ms == 0 {
///         return Err(ToasterError::Config("display_time must be positive".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_display_time(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum ToasterError {
    /// Configuration is invalid or malformed.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON-encoded signal could not be decoded.
    #[error("Signal decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A second surface tried to attach to a bus that already has one.
    #[error("a toaster surface is already attached to this bus")]
    SurfaceAttached,
}

/// A specialized `Result` type for toaster operations.
pub type Result<T> = std::result::Result<T, ToasterError>;

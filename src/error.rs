// src/error.rs
//! Error types for buffer operations with conversion support

use thiserror::Error;

/// Errors that can occur during buffer operations.
///
/// Every error is raised at the call that detects it. None of them are
/// transient: retrying the same call with the same inputs fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// An argument is neither a byte buffer nor text
    #[error("Type error: {0}")]
    TypeArgument(String),
    /// An argument has the right type but an unusable value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Malformed textual input to a parser
    #[error("Format error: {0}")]
    Format(String),
    /// Mutation attempted on a closed sink
    #[error("Stream is not writable")]
    StreamClosed,
    /// Unknown or unsupported text encoding name
    #[error("Unknown encoding: {0}")]
    Encoding(String),
}

impl BufferError {
    /// The error raised whenever a value is neither a buffer nor text.
    pub(crate) fn not_buffer_like() -> Self {
        Self::TypeArgument("argument should be either a buffer or a string".into())
    }
}

// ============================================================================
// ERROR CONVERSION
// ============================================================================

impl From<hex::FromHexError> for BufferError {
    fn from(err: hex::FromHexError) -> Self {
        BufferError::Format(err.to_string())
    }
}

/// Convert BufferError to std::io::Error
impl From<BufferError> for std::io::Error {
    fn from(err: BufferError) -> Self {
        use std::io::ErrorKind;
        match err {
            BufferError::StreamClosed => std::io::Error::new(ErrorKind::BrokenPipe, err),
            BufferError::Format(_) => std::io::Error::new(ErrorKind::InvalidData, err),
            _ => std::io::Error::new(ErrorKind::InvalidInput, err),
        }
    }
}

/// Convert BufferError to anyhow::Error
#[cfg(feature = "anyhow")]
impl From<BufferError> for anyhow::Error {
    fn from(err: BufferError) -> Self {
        anyhow::anyhow!("{}", err)
    }
}

// ============================================================================
// RESULT TYPE ALIASES
// ============================================================================

/// Result type alias for buffer operations
///
/// Note: When using with other Result types (like anyhow::Result),
/// either qualify the type (`buftools::Result<T>`) or use the conversion traits.
pub type Result<T> = std::result::Result<T, BufferError>;

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> std::io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(|e| e.into())
    }

    fn into_io(self) -> std::io::Result<T> {
        self.map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_io() {
        let io_err: std::io::Error = BufferError::StreamClosed.into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::BrokenPipe);

        let io_err: std::io::Error = BufferError::Format("odd length".into()).into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidData);

        let io_err: std::io::Error = BufferError::Encoding("ebcdic".into()).into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_hex_error_is_format() {
        let err: BufferError = hex::FromHexError::OddLength.into();
        assert!(matches!(err, BufferError::Format(_)));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<u32> = Ok(42);
        assert_eq!(result.into_io().unwrap(), 42);

        let result: Result<u32> = Err(BufferError::StreamClosed);
        assert!(result.into_io().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(BufferError::StreamClosed.to_string(), "Stream is not writable");
        assert_eq!(
            BufferError::Encoding("ebcdic".into()).to_string(),
            "Unknown encoding: ebcdic"
        );
    }

    #[cfg(feature = "anyhow")]
    #[test]
    fn test_anyhow_conversion() {
        let anyhow_err: anyhow::Error = BufferError::StreamClosed.into();
        assert!(anyhow_err.to_string().contains("not writable"));
    }
}

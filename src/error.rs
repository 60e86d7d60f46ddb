//! Error handling for the mafclean filtering pipeline
//!
//! Expected per-block conditions (missing quality annotation, fully
//! discarded blocks, undersized blocks) are modeled as defined outcomes,
//! not errors. Only configuration mistakes and I/O surface here.

use thiserror::Error;

/// Error type for all mafclean operations
#[derive(Error, Debug)]
pub enum MafCleanError {
    /// I/O errors (diagnostic sink, upstream readers)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error, rejected at construction time
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid column range requested on a block or sequence
    #[error("Invalid column range {start}..{end} for width {width}")]
    InvalidRange {
        start: usize,
        end: usize,
        width: usize,
    },

    /// Annotation length does not match its sequence width
    #[error("Annotation '{kind}' has length {got}, sequence width is {want}")]
    AnnotationLength {
        kind: String,
        got: usize,
        want: usize,
    },

    /// Sequence width does not match the block it is added to
    #[error("Sequence '{species}' has width {got}, block width is {want}")]
    WidthMismatch {
        species: String,
        got: usize,
        want: usize,
    },

    /// Generic anyhow error for complex nested errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MafCleanError {
    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an InvalidRange error
    pub fn invalid_range(start: usize, end: usize, width: usize) -> Self {
        Self::InvalidRange { start, end, width }
    }

    /// Create an AnnotationLength error
    pub fn annotation_length(kind: impl Into<String>, got: usize, want: usize) -> Self {
        Self::AnnotationLength {
            kind: kind.into(),
            got,
            want,
        }
    }

    /// Create a WidthMismatch error
    pub fn width_mismatch(species: impl Into<String>, got: usize, want: usize) -> Self {
        Self::WidthMismatch {
            species: species.into(),
            got,
            want,
        }
    }
}

/// Result type alias for mafclean operations
pub type Result<T> = std::result::Result<T, MafCleanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let err = MafCleanError::invalid_range(5, 12, 10);
        assert_eq!(err.to_string(), "Invalid column range 5..12 for width 10");

        let err = MafCleanError::annotation_length("quality", 9, 10);
        assert_eq!(
            err.to_string(),
            "Annotation 'quality' has length 9, sequence width is 10"
        );

        let err = MafCleanError::config("window_size must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: window_size must be positive"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "sink closed");
        let err: MafCleanError = io_err.into();

        match err {
            MafCleanError::Io(_) => (),
            _ => panic!("Expected Io error"),
        }
    }
}

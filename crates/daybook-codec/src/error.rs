//! Codec error types.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while reading or writing an event file.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A details line could not be parsed.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// An event name was not followed by a details line.
    #[error("line {line}: event name has no details line")]
    MissingDetails { line: usize },

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Creates a syntax error for the given 1-based line.
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Returns the 1-based line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } | Self::MissingDetails { line } => Some(*line),
            Self::Io(_) => None,
        }
    }

    /// Returns true if the error is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

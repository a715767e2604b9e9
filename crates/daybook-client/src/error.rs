//! Client error types.

use std::fmt;

use daybook_codec::CodecError;
use daybook_core::CalendarError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// IO error.
    Io(std::io::Error),
    /// Event file could not be read or written.
    Codec(CodecError),
    /// The calendar refused an operation.
    Calendar(CalendarError),
    /// Menu input could not be understood.
    Input(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Codec(err) => write!(f, "event file error: {}", err),
            Self::Calendar(err) => write!(f, "{}", err),
            Self::Input(msg) => write!(f, "invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Calendar(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<CodecError> for ClientError {
    fn from(err: CodecError) -> Self {
        Self::Codec(err)
    }
}

impl From<CalendarError> for ClientError {
    fn from(err: CalendarError) -> Self {
        Self::Calendar(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn display_messages() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap();
        let err = ClientError::from(CalendarError::not_found("Dentist", date));
        assert_eq!(err.to_string(), "no event named \"Dentist\" on 2024-01-12");

        let err = ClientError::Input("bad date `13/1/2024`".into());
        assert_eq!(err.to_string(), "invalid input: bad date `13/1/2024`");

        let err = ClientError::from(CodecError::MissingDetails { line: 3 });
        assert_eq!(
            err.to_string(),
            "event file error: line 3: event name has no details line"
        );
    }
}

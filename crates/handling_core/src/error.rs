use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandlingError {
    #[error("No file loaded")]
    NoFileLoaded,

    #[error("Input is not valid UTF-8 text: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Invalid offset: {0} (expected a finite, non-negative percentage)")]
    InvalidOffset(f64),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid run config: {0}")]
    Config(String),
}

/// Coarse classification of [`HandlingError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Precondition,
    MalformedRecord,
    Io,
    Decode,
    InvalidInput,
}

impl HandlingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HandlingError::NoFileLoaded => ErrorKind::Precondition,
            HandlingError::MalformedRecord { .. } => ErrorKind::MalformedRecord,
            HandlingError::Io { .. } => ErrorKind::Io,
            HandlingError::Decode(_) => ErrorKind::Decode,
            HandlingError::InvalidOffset(_) | HandlingError::Config(_) => ErrorKind::InvalidInput,
        }
    }

    /// Whether the session can keep going after this error.
    ///
    /// None of these errors touch loaded session state, so only input that
    /// can never be processed is treated as unrecoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            HandlingError::NoFileLoaded => true,
            HandlingError::Io { .. } => true,
            HandlingError::InvalidOffset(_) => true,
            HandlingError::Config(_) => true,
            HandlingError::MalformedRecord { .. } => false,
            HandlingError::Decode(_) => false,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HandlingError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for HandlingError {
    fn from(err: serde_json::Error) -> Self {
        HandlingError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HandlingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinguishable() {
        assert_eq!(HandlingError::NoFileLoaded.kind(), ErrorKind::Precondition);
        assert_eq!(
            HandlingError::MalformedRecord { line: 3, reason: "short".into() }.kind(),
            ErrorKind::MalformedRecord
        );
        let io = HandlingError::io(
            "ohandling.dat",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.kind(), ErrorKind::Io);
        assert!(io.is_recoverable());
        assert!(io.to_string().contains("ohandling.dat"));
    }

    #[test]
    fn test_decode_error_from_utf8() {
        let err: HandlingError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(!err.is_recoverable());
    }
}

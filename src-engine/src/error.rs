//! Error types for capture-session operations.

use std::fmt;

/// Error returned when opening the frame source fails.
///
/// Open failures are fatal for the session: they are surfaced to the
/// caller once and never retried automatically.
#[derive(Debug)]
pub enum SourceError {
    /// I/O failure talking to the camera driver
    Io(std::io::Error),
    /// The camera hardware is busy, missing, or refused to open
    Hardware(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io(e) => write!(f, "frame source I/O error: {}", e),
            SourceError::Hardware(msg) => write!(f, "camera hardware unavailable: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SourceError::Hardware("fail to connect to camera service".to_string());
        assert_eq!(
            err.to_string(),
            "camera hardware unavailable: fail to connect to camera service"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no device");
        let err: SourceError = io.into();
        assert!(matches!(err, SourceError::Io(_)));
    }
}

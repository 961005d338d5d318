use thiserror::Error;

use crate::game::SessionPhase;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed beatmap: {0}")]
    MalformedBeatmap(String),

    #[error("Audio analysis unavailable: {0}")]
    AudioAnalysisUnavailable(String),

    #[error("Failed to load track: {0}")]
    TrackLoadFailure(String),

    #[error("Cannot {command} while in {phase} phase")]
    InvalidTransition {
        phase: SessionPhase,
        command: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::Io(other_io_err);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = Error::InvalidTransition {
            phase: SessionPhase::Title,
            command: "abort",
        };
        assert_eq!(err.to_string(), "Cannot abort while in Title phase");
    }
}

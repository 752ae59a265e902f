use thiserror::Error;

use crate::models::PlayerId;
use crate::store::MatchId;

/// Rejections raised by the innings state machine and the score recorder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Invalid runs: {runs} (expected 0..=6)")]
    InvalidRuns { runs: u8 },

    #[error("Ball participants do not match the players at the crease")]
    ParticipantMismatch,

    #[error("Over completed: choose the next bowler before recording another ball")]
    OverCompleted,

    #[error("Match already won: target reached")]
    MatchAlreadyWon,

    #[error("Batter {0} is not at the crease")]
    UnknownBatter(PlayerId),

    #[error("Innings is not at a break")]
    NotAtInningsBreak,

    #[error("Innings break reached: no further balls can be recorded")]
    InningsOver,

    #[error("Both innings have been played")]
    MatchComplete,

    #[error("No first innings stored for match {0}")]
    MissingFirstInnings(MatchId),

    #[error("Second innings of match {0} is already stored")]
    SecondInningsExists(MatchId),

    #[error("Invalid match config: {0}")]
    InvalidConfig(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl ScoringError {
    /// Whether the operator can fix the input and retry the same action.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScoringError::InvalidRuns { .. }
                | ScoringError::ParticipantMismatch
                | ScoringError::OverCompleted
                | ScoringError::UnknownBatter(_)
        )
    }
}

impl From<ConfigError> for ScoringError {
    fn from(err: ConfigError) -> Self {
        ScoringError::InvalidConfig(err.to_string())
    }
}

impl From<StoreError> for ScoringError {
    fn from(err: StoreError) -> Self {
        ScoringError::Store(err.to_string())
    }
}

/// Failures of a [`crate::store::MatchStore`] backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupted match record: {path}")]
    Corrupted { path: String },
}

/// Invalid or unreadable [`crate::config::MatchConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ScoringError>;

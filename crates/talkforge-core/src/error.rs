//! Error types for talkforge

use thiserror::Error;

/// Input that makes a solve impossible to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("no talks supplied")]
    NoTalks,

    #[error("no timeslots supplied")]
    NoTimeslots,

    #[error("no rooms supplied")]
    NoRooms,
}

/// Main error type for talkforge operations
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The problem cannot be solved at all (empty entity lists)
    #[error("Structural error: {0}")]
    Structural(#[from] StructuralError),

    /// Two facts of the same kind share an identifier
    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    /// An identifier does not name any known fact
    #[error("Unknown {kind} '{id}'")]
    UnknownReference { kind: &'static str, id: String },

    /// A time of day or timeslot range is malformed
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for talkforge operations
pub type Result<T> = std::result::Result<T, ScheduleError>;

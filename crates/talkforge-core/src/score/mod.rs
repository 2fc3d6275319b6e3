//! Score type for representing schedule quality
//!
//! A schedule is judged first by how many hard rules it breaks and then by
//! how many soft preferences it misses. Both levels are stored as
//! non-positive numbers so that a greater score is always a better one.

mod hard_medium_soft;
mod hard_soft;

#[cfg(test)]
mod tests;

pub use hard_medium_soft::HardMediumSoftScore;
pub use hard_soft::HardSoftScore;

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreParseError {
    pub message: String,
}

impl std::fmt::Display for ScoreParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score parse error: {}", self.message)
    }
}

impl std::error::Error for ScoreParseError {}

//! Talk planning entity facts.

use std::fmt;

use smallvec::SmallVec;

/// Audience level of a talk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum AudienceLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl AudienceLevel {
    /// Numeric rank: 1 for beginner through 3 for advanced.
    #[inline]
    pub const fn rank(self) -> u32 {
        match self {
            AudienceLevel::Beginner => 1,
            AudienceLevel::Intermediate => 2,
            AudienceLevel::Advanced => 3,
        }
    }

    /// Parses a level name case-insensitively; anything unrecognized is
    /// `Intermediate`.
    ///
    /// ```
    /// use talkforge_core::AudienceLevel;
    ///
    /// assert_eq!(AudienceLevel::parse_lenient(" beginner"), AudienceLevel::Beginner);
    /// assert_eq!(AudienceLevel::parse_lenient(""), AudienceLevel::Intermediate);
    /// assert_eq!(AudienceLevel::parse_lenient("expert"), AudienceLevel::Intermediate);
    /// ```
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "BEGINNER" => AudienceLevel::Beginner,
            "ADVANCED" => AudienceLevel::Advanced,
            _ => AudienceLevel::Intermediate,
        }
    }
}

impl fmt::Display for AudienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AudienceLevel::Beginner => "BEGINNER",
            AudienceLevel::Intermediate => "INTERMEDIATE",
            AudienceLevel::Advanced => "ADVANCED",
        };
        f.write_str(name)
    }
}

/// A talk to be placed in a (timeslot, room) pair.
///
/// Speakers are indices into `ConferenceProblem::speakers`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Talk {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Track name. Talks with an empty name share one unnamed track.
    pub track: String,
    pub level: AudienceLevel,
    pub speakers: SmallVec<[usize; 2]>,
    /// Sequencing hint within a track; 0 expresses no preference.
    pub flow_order: u32,
}

impl Talk {
    #[inline]
    pub fn has_track(&self) -> bool {
        !self.track.is_empty()
    }
}

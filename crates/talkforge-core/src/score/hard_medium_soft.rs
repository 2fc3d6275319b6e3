//! HardMediumSoftScore - Three-level score used while solving

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use super::HardSoftScore;

const MEDIUM_WEIGHT: f64 = 1_000_000.0;
const HARD_WEIGHT: f64 = MEDIUM_WEIGHT * MEDIUM_WEIGHT;

/// A score with hard, medium, and soft levels.
///
/// The solver ranks candidate schedules with this score: the hard level holds
/// broken hard constraints, the medium level holds talks left without a
/// placement, and the soft level holds missed preferences. Levels compare
/// lexicographically, so a schedule never trades a hard violation for
/// another placed talk.
///
/// # Examples
///
/// ```
/// use talkforge_core::{HardMediumSoftScore, HardSoftScore};
///
/// let complete = HardMediumSoftScore::of(0, 0, -7);
/// let partial = HardMediumSoftScore::of(0, -1, 0);
/// assert!(complete > partial);
///
/// let hs = HardSoftScore::penalty(0, 7);
/// assert_eq!(HardMediumSoftScore::from_parts(hs, 0), complete);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardMediumSoftScore {
    hard: i64,
    medium: i64,
    soft: i64,
}

impl HardMediumSoftScore {
    /// The zero score.
    pub const ZERO: HardMediumSoftScore = HardMediumSoftScore {
        hard: 0,
        medium: 0,
        soft: 0,
    };

    /// Creates a score from raw level values.
    #[inline]
    pub const fn of(hard: i64, medium: i64, soft: i64) -> Self {
        HardMediumSoftScore { hard, medium, soft }
    }

    /// Combines a constraint score with the number of unassigned talks.
    #[inline]
    pub const fn from_parts(score: HardSoftScore, unassigned: usize) -> Self {
        HardMediumSoftScore {
            hard: score.hard(),
            medium: -(unassigned as i64),
            soft: score.soft(),
        }
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn medium(&self) -> i64 {
        self.medium
    }

    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Number of talks without a placement.
    #[inline]
    pub const fn unassigned_count(&self) -> usize {
        (-self.medium) as usize
    }

    /// Drops the medium level.
    #[inline]
    pub const fn to_hard_soft(&self) -> HardSoftScore {
        HardSoftScore::of(self.hard, self.soft)
    }

    /// Returns true when no hard constraint is broken and every talk is placed.
    #[inline]
    pub const fn is_complete_and_feasible(&self) -> bool {
        self.hard >= 0 && self.medium >= 0
    }

    /// Collapses all levels into one number, higher levels dominating.
    #[inline]
    pub fn to_scalar(&self) -> f64 {
        self.hard as f64 * HARD_WEIGHT + self.medium as f64 * MEDIUM_WEIGHT + self.soft as f64
    }

    pub fn to_level_numbers(&self) -> [i64; 3] {
        [self.hard, self.medium, self.soft]
    }
}

impl Ord for HardMediumSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hard
            .cmp(&other.hard)
            .then(self.medium.cmp(&other.medium))
            .then(self.soft.cmp(&other.soft))
    }
}

impl PartialOrd for HardMediumSoftScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for HardMediumSoftScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        HardMediumSoftScore::of(
            self.hard + other.hard,
            self.medium + other.medium,
            self.soft + other.soft,
        )
    }
}

impl Sub for HardMediumSoftScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        HardMediumSoftScore::of(
            self.hard - other.hard,
            self.medium - other.medium,
            self.soft - other.soft,
        )
    }
}

impl Neg for HardMediumSoftScore {
    type Output = Self;

    fn neg(self) -> Self {
        HardMediumSoftScore::of(-self.hard, -self.medium, -self.soft)
    }
}

impl fmt::Debug for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HardMediumSoftScore({}, {}, {})",
            self.hard, self.medium, self.soft
        )
    }
}

impl fmt::Display for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}medium/{}soft", self.hard, self.medium, self.soft)
    }
}

//! HardSoftScore - Two-level score with hard and soft constraints

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use super::ScoreParseError;

/// Weight of one hard level unit when the score is collapsed to a scalar.
const HARD_WEIGHT: f64 = 1_000_000.0;

/// A score with separate hard and soft constraint levels.
///
/// Each level holds the negated violation count, so `0hard/0soft` is the
/// best possible score. When comparing scores:
/// 1. Hard scores are compared first
/// 2. Soft scores are only compared when hard scores are equal
///
/// # Examples
///
/// ```
/// use talkforge_core::HardSoftScore;
///
/// let infeasible = HardSoftScore::penalty(1, 0);
/// let poor = HardSoftScore::penalty(0, 20);
/// let good = HardSoftScore::penalty(0, 3);
///
/// assert!(poor > infeasible);
/// assert!(good > poor);
/// assert_eq!(good.soft_penalty(), 3);
/// assert_eq!(good.to_string(), "0hard/-3soft");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    /// The zero score.
    pub const ZERO: HardSoftScore = HardSoftScore { hard: 0, soft: 0 };

    /// One broken hard constraint.
    pub const ONE_HARD: HardSoftScore = HardSoftScore { hard: -1, soft: 0 };

    /// One missed soft preference.
    pub const ONE_SOFT: HardSoftScore = HardSoftScore { hard: 0, soft: -1 };

    /// Creates a score from raw level values.
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftScore { hard, soft }
    }

    /// Creates a score from non-negative violation counts.
    #[inline]
    pub const fn penalty(hard_violations: i64, soft_penalty: i64) -> Self {
        HardSoftScore {
            hard: -hard_violations,
            soft: -soft_penalty,
        }
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Number of broken hard constraints.
    #[inline]
    pub const fn hard_violations(&self) -> i64 {
        -self.hard
    }

    /// Number of missed soft preferences.
    #[inline]
    pub const fn soft_penalty(&self) -> i64 {
        -self.soft
    }

    /// Returns true when no hard constraint is broken.
    #[inline]
    pub const fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    /// Collapses both levels into one number, hard level dominating.
    #[inline]
    pub fn to_scalar(&self) -> f64 {
        self.hard as f64 * HARD_WEIGHT + self.soft as f64
    }

    /// Returns the score values, highest priority first.
    pub fn to_level_numbers(&self) -> [i64; 2] {
        [self.hard, self.soft]
    }
}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl PartialOrd for HardSoftScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for HardSoftScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        HardSoftScore::of(self.hard + other.hard, self.soft + other.soft)
    }
}

impl AddAssign for HardSoftScore {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for HardSoftScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        HardSoftScore::of(self.hard - other.hard, self.soft - other.soft)
    }
}

impl SubAssign for HardSoftScore {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for HardSoftScore {
    type Output = Self;

    fn neg(self) -> Self {
        HardSoftScore::of(-self.hard, -self.soft)
    }
}

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

impl FromStr for HardSoftScore {
    type Err = ScoreParseError;

    /// Parses the `"0hard/-3soft"` format produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (hard_part, soft_part) = s.split_once('/').ok_or_else(|| ScoreParseError {
            message: format!("Invalid HardSoftScore format '{s}': expected 2 parts separated by '/'"),
        })?;
        let hard = parse_level(hard_part, "hard")?;
        let soft = parse_level(soft_part, "soft")?;
        Ok(HardSoftScore::of(hard, soft))
    }
}

fn parse_level(part: &str, suffix: &str) -> Result<i64, ScoreParseError> {
    let part = part.trim();
    let num_str = part.strip_suffix(suffix).ok_or_else(|| ScoreParseError {
        message: format!("{suffix} part '{part}' must end with '{suffix}'"),
    })?;
    num_str.parse::<i64>().map_err(|e| ScoreParseError {
        message: format!("Invalid {suffix} score '{num_str}': {e}"),
    })
}

//! Speaker problem fact and day availability.

use std::collections::BTreeSet;

/// Days on which a speaker can present.
///
/// # Examples
///
/// ```
/// use talkforge_core::Availability;
///
/// let any = Availability::from_days([]);
/// assert!(any.is_available_on(3));
///
/// let tue_wed = Availability::from_days([1, 2]);
/// let wed_thu = Availability::from_days([2, 3]);
/// let both = tue_wed.intersect(&wed_thu);
/// assert!(both.is_available_on(2));
/// assert!(!both.is_available_on(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Availability {
    /// No restriction declared.
    #[default]
    AllDays,
    /// Only the listed day indices. An empty set means no day at all.
    Days(BTreeSet<u32>),
}

impl Availability {
    /// Builds an availability from declared days; no days means every day.
    pub fn from_days(days: impl IntoIterator<Item = u32>) -> Self {
        let days: BTreeSet<u32> = days.into_iter().collect();
        if days.is_empty() {
            Availability::AllDays
        } else {
            Availability::Days(days)
        }
    }

    pub fn is_available_on(&self, day_index: u32) -> bool {
        match self {
            Availability::AllDays => true,
            Availability::Days(days) => days.contains(&day_index),
        }
    }

    /// Most restrictive combination of both availabilities.
    pub fn intersect(&self, other: &Availability) -> Availability {
        match (self, other) {
            (Availability::AllDays, rest) | (rest, Availability::AllDays) => rest.clone(),
            (Availability::Days(a), Availability::Days(b)) => {
                Availability::Days(a.intersection(b).copied().collect())
            }
        }
    }

    /// True when the restriction excludes every day.
    pub fn is_never(&self) -> bool {
        matches!(self, Availability::Days(days) if days.is_empty())
    }
}

/// A person presenting one or more talks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Speaker {
    pub id: String,
    pub name: String,
    pub availability: Availability,
}

impl Speaker {
    /// Creates a speaker whose id is derived from the name.
    pub fn new(name: impl Into<String>, availability: Availability) -> Self {
        let name = name.into();
        Self {
            id: Self::id_for_name(&name),
            name,
            availability,
        }
    }

    /// Normalized identifier for a display name.
    ///
    /// ```
    /// use talkforge_core::Speaker;
    ///
    /// assert_eq!(Speaker::id_for_name("  Grace Hopper "), "grace_hopper");
    /// ```
    pub fn id_for_name(name: &str) -> String {
        name.trim().to_lowercase().replace(' ', "_")
    }
}

//! Timeslot problem fact.

use super::TimeOfDay;

/// A block of time on one conference day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeslot {
    pub id: String,
    /// Zero-based conference day; 0 for single-day events.
    pub day_index: u32,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub day_label: Option<String>,
}

impl Timeslot {
    pub fn new(id: impl Into<String>, day_index: u32, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            id: id.into(),
            day_index,
            start,
            end,
            day_label: None,
        }
    }

    pub fn with_day_label(mut self, label: impl Into<String>) -> Self {
        self.day_label = Some(label.into());
        self
    }

    /// Total order key across days: day-major, start-time-minor.
    ///
    /// ```
    /// use talkforge_core::{TimeOfDay, Timeslot};
    ///
    /// let slot = Timeslot::new("d2-am", 1, TimeOfDay::hm(9, 0), TimeOfDay::hm(10, 0));
    /// assert_eq!(slot.slot_index(), 10_540);
    /// ```
    #[inline]
    pub fn slot_index(&self) -> u64 {
        u64::from(self.day_index) * 10_000 + u64::from(self.start.minutes())
    }

    /// Day label for reports, `"Day N"` when none was given.
    pub fn day_display(&self) -> String {
        match &self.day_label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => format!("Day {}", self.day_index + 1),
        }
    }
}

//! Time of day with minute resolution.

use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minutes since midnight.
///
/// # Examples
///
/// ```
/// use talkforge_core::TimeOfDay;
///
/// let t: TimeOfDay = "09:30".parse().unwrap();
/// assert_eq!(t, TimeOfDay::hm(9, 30));
/// assert_eq!(t.minutes(), 570);
/// assert_eq!(t.to_string(), "09:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Creates a time from hour and minute, wrapping past midnight.
    pub const fn hm(hour: u16, minute: u16) -> Self {
        let minutes = (hour as u32 * 60 + minute as u32) % MINUTES_PER_DAY as u32;
        TimeOfDay(minutes as u16)
    }

    /// Creates a time from hour and minute, rejecting out-of-range values.
    pub fn try_hm(hour: u16, minute: u16) -> Result<Self, ScheduleError> {
        if hour >= 24 || minute >= 60 {
            return Err(ScheduleError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(TimeOfDay(hour * 60 + minute))
    }

    /// Minutes since midnight.
    #[inline]
    pub const fn minutes(&self) -> u16 {
        self.0
    }

    pub const fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub const fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({self})")
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTime(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = hour.trim().parse::<u16>().map_err(|_| invalid())?;
        let minute = minute.trim().parse::<u16>().map_err(|_| invalid())?;
        TimeOfDay::try_hm(hour, minute)
    }
}

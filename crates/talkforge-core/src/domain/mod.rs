//! Domain model for conference scheduling
//!
//! Problem facts are immutable once a `ConferenceProblem` is built:
//! - `Timeslot`: a start/end time on a conference day
//! - `Room`: a place where one talk happens at a time
//! - `Speaker`: a person with day availability
//! - `Talk`: the thing being planned
//!
//! The only mutable structure is the `Assignment` held by a `Schedule`.

mod builder;
mod problem;
mod room;
mod schedule;
mod speaker;
mod talk;
mod time;
mod timeslot;

#[cfg(test)]
mod tests;

pub use builder::{ProblemBuilder, TalkEntry};
pub use problem::{CapacityWarning, ConferenceProblem};
pub use room::Room;
pub use schedule::{Assignment, Placement, Schedule, ScheduleEntry};
pub use speaker::{Availability, Speaker};
pub use talk::{AudienceLevel, Talk};
pub use time::TimeOfDay;
pub use timeslot::Timeslot;

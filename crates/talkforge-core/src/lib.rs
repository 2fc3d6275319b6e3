//! talkforge Core - Core types for conference talk scheduling
//!
//! This crate provides the fundamental abstractions for talkforge:
//! - `HardSoftScore` for representing schedule quality
//! - Problem facts (timeslots, rooms, speakers, talks)
//! - The planning structure (`Assignment`, `Schedule`)
//! - `ProblemBuilder`, which validates input and merges speaker availability

pub mod domain;
pub mod error;
pub mod score;

pub use domain::{
    Assignment, AudienceLevel, Availability, CapacityWarning, ConferenceProblem, Placement,
    ProblemBuilder, Room, Schedule, ScheduleEntry, Speaker, Talk, TalkEntry, TimeOfDay, Timeslot,
};
pub use error::{Result, ScheduleError, StructuralError};
pub use score::{HardMediumSoftScore, HardSoftScore, ScoreParseError};

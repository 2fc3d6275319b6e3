//! Shared test fixtures for talkforge crates.
//!
//! This crate only builds problems. It does NOT depend on
//! `talkforge-scoring` or `talkforge-solver` to avoid circular dependencies.
//!
//! - [`scenarios`] - Small hand-made problems with a known outcome
//! - [`sample`] - A larger multi-day conference with tracks and shared speakers
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! talkforge-test = { workspace = true }
//! ```
//!
//! ```
//! use talkforge_test::scenarios::shared_speaker;
//!
//! let problem = shared_speaker();
//! assert_eq!(problem.talk_count(), 2);
//! ```

pub mod sample;
pub mod scenarios;

use std::sync::Arc;

use talkforge_core::{ConferenceProblem, Schedule, TimeOfDay, Timeslot};

pub use sample::sample_conference;

/// One-hour timeslot starting on the hour.
pub fn hour_slot(id: &str, day_index: u32, hour: u16) -> Timeslot {
    Timeslot::new(
        id,
        day_index,
        TimeOfDay::hm(hour, 0),
        TimeOfDay::hm(hour + 1, 0),
    )
}

/// Empty schedule over the problem.
pub fn empty_schedule(problem: ConferenceProblem) -> Schedule {
    Schedule::new(Arc::new(problem))
}

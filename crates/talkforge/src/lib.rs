//! talkforge - A Conference Talk Scheduler in Rust
//!
//! Build a problem, call [`solve`], read the schedule.
//!
//! # Example
//!
//! ```rust
//! use talkforge::prelude::*;
//!
//! let problem = ProblemBuilder::new()
//!     .timeslot(Timeslot::new("s1", 0, TimeOfDay::hm(9, 0), TimeOfDay::hm(10, 0)))
//!     .timeslot(Timeslot::new("s2", 0, TimeOfDay::hm(10, 0), TimeOfDay::hm(11, 0)))
//!     .room(Room::new("r1", "Main Hall"))
//!     .talk(TalkEntry::new("t1", "Async basics").speaker("Dana Scott", Availability::AllDays))
//!     .talk(TalkEntry::new("t2", "Async in depth").speaker("Dana Scott", Availability::AllDays))
//!     .build()
//!     .unwrap();
//!
//! let config = SolverConfig::new().with_random_seed(7).with_step_limit(100);
//! let result = Solver::new(config).solve(problem).unwrap();
//!
//! assert_eq!(result.status(), SolveStatus::OptimalOrFeasible);
//! assert_eq!(result.score(), HardSoftScore::ZERO);
//! ```

// Score types
pub use talkforge_core::score::{HardMediumSoftScore, HardSoftScore, ScoreParseError};

// Domain model
pub use talkforge_core::domain::{
    Assignment, AudienceLevel, Availability, CapacityWarning, ConferenceProblem, Placement,
    ProblemBuilder, Room, Schedule, ScheduleEntry, Speaker, Talk, TalkEntry, TimeOfDay, Timeslot,
};
pub use talkforge_core::{ScheduleError, StructuralError};

// Scoring and score analysis
pub use talkforge_scoring::{
    analyze, evaluate, ConstraintAnalysis, ConstraintKind, ConstraintMatch, Indictment,
    ScoreDirector, ScoreExplanation,
};

// Configuration
pub use talkforge_config::{ConfigError, EnvironmentMode, SolverConfig};

// Solver
pub use talkforge_solver::{
    SolveError, SolveResult, SolveStatus, Solver, SolverState, SolverStats, UnassignedReason,
    UnassignedTalk,
};

#[cfg(feature = "console")]
pub mod console;

mod solve;
pub use solve::{solve, CONFIG_FILE};

pub mod prelude {
    pub use super::{
        AudienceLevel, Availability, ConferenceProblem, HardSoftScore, ProblemBuilder, Room,
        Schedule, TalkEntry, TimeOfDay, Timeslot,
    };
    pub use super::{SolveResult, SolveStatus, Solver, SolverConfig, UnassignedReason};
}

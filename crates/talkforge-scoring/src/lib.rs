//! Constraint scoring for talkforge
//!
//! This crate provides:
//! - `ConstraintKind`: the hard and soft rules of a conference schedule
//! - `evaluate`: from-scratch evaluation of any `Schedule`
//! - `ScoreDirector`: incremental evaluation around single-talk changes
//! - `analyze`: per-constraint explanation and per-talk indictments

pub mod analysis;
pub mod constraint;
pub mod director;
pub mod evaluator;

pub use analysis::{analyze, ConstraintAnalysis, ConstraintMatch, Indictment, ScoreExplanation};
pub use constraint::{ConstraintKind, ConstraintMatches};
pub use director::ScoreDirector;
pub use evaluator::{evaluate, evaluate_by_constraint};

//! Moves on a schedule and the selector sampling them.

mod moves;
mod selector;

pub use moves::{ChangeMove, MoveKey, ScheduleMove, SwapMove};
pub use selector::NeighborhoodSelector;

#[cfg(test)]
mod tests;

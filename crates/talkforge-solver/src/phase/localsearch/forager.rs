//! Forager for local search move selection.

use talkforge_core::HardMediumSoftScore;

/// Keeps the best accepted move of a step.
///
/// Moves are referenced by their index in the step's neighborhood. On
/// equal scores the earlier move wins.
#[derive(Debug, Clone, Default)]
pub struct BestAcceptedForager {
    best: Option<(usize, HardMediumSoftScore)>,
    accepted_count: usize,
}

impl BestAcceptedForager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called at the start of each step to reset state.
    pub fn step_started(&mut self) {
        self.best = None;
        self.accepted_count = 0;
    }

    pub fn add_move_index(&mut self, index: usize, score: HardMediumSoftScore) {
        self.accepted_count += 1;
        if self.best.map_or(true, |(_, best)| score > best) {
            self.best = Some((index, score));
        }
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted_count
    }

    /// The best accepted move index and its score, if any move was accepted.
    pub fn pick_move_index(&self) -> Option<(usize, HardMediumSoftScore)> {
        self.best
    }
}

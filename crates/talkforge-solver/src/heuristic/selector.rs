//! Neighborhood sampling for local search.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use talkforge_scoring::ScoreDirector;

use super::{ChangeMove, ScheduleMove, SwapMove};

/// Attempts per requested move before sampling gives up on a step.
const ATTEMPTS_PER_MOVE: usize = 4;

/// Samples the candidate moves of one local search step.
///
/// Placements for unassigned talks come first: every free (timeslot, room)
/// pair on a day their speakers attend. The rest of the neighborhood is
/// drawn at random, half of the draws picking a talk in a hard conflict
/// while any exist. A drawn talk is moved to a free pair or swapped with
/// another talk.
///
/// # Example
///
/// ```
/// use talkforge_solver::NeighborhoodSelector;
///
/// let selector = NeighborhoodSelector::new(64);
/// assert_eq!(selector.neighborhood_size(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct NeighborhoodSelector {
    neighborhood_size: usize,
}

impl NeighborhoodSelector {
    pub fn new(neighborhood_size: usize) -> Self {
        Self { neighborhood_size }
    }

    pub fn neighborhood_size(&self) -> usize {
        self.neighborhood_size
    }

    /// Replaces `moves` with a fresh neighborhood of doable moves.
    pub fn fill(
        &self,
        director: &ScoreDirector,
        rng: &mut ChaCha8Rng,
        moves: &mut Vec<ScheduleMove>,
    ) {
        moves.clear();
        let schedule = director.working_solution();
        let problem = schedule.problem();
        let talk_count = problem.talk_count();
        let free = director.free_placements();

        for talk in schedule.unassigned_talks() {
            if !problem.has_available_timeslot(talk) {
                continue;
            }
            for &at in &free {
                if moves.len() >= self.neighborhood_size {
                    return;
                }
                if problem.is_available(talk, at.timeslot) {
                    moves.push(ChangeMove::new(talk, at).into());
                }
            }
        }

        if talk_count == 0 {
            return;
        }
        let conflicted = director.conflicted_talks();
        let mut attempts = 0;
        while moves.len() < self.neighborhood_size
            && attempts < self.neighborhood_size * ATTEMPTS_PER_MOVE
        {
            attempts += 1;
            let talk = if !conflicted.is_empty() && rng.random_bool(0.5) {
                conflicted[rng.random_range(0..conflicted.len())]
            } else {
                rng.random_range(0..talk_count)
            };
            let candidate: ScheduleMove = if !free.is_empty() && rng.random_bool(0.5) {
                ChangeMove::new(talk, free[rng.random_range(0..free.len())]).into()
            } else {
                SwapMove::new(talk, rng.random_range(0..talk_count)).into()
            };
            if candidate.is_doable(director) {
                moves.push(candidate);
            }
        }
    }
}

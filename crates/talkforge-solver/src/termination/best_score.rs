//! Best score termination.

use std::fmt::Debug;

use talkforge_core::HardSoftScore;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates when the best schedule places every talk and its score
/// reaches the target.
///
/// # Example
///
/// ```
/// use talkforge_core::HardSoftScore;
/// use talkforge_solver::termination::BestScoreTermination;
///
/// // Stop as soon as a feasible schedule with at most 5 soft penalty exists
/// let term = BestScoreTermination::new(HardSoftScore::penalty(0, 5));
/// ```
#[derive(Debug, Clone)]
pub struct BestScoreTermination {
    target: HardSoftScore,
}

impl BestScoreTermination {
    pub fn new(target: HardSoftScore) -> Self {
        Self { target }
    }
}

impl Termination for BestScoreTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool {
        solver_scope.best_score().is_some_and(|best| {
            best.unassigned_count() == 0 && best.to_hard_soft() >= self.target
        })
    }
}

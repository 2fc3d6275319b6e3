//! Termination based on lack of improvement.

use std::fmt::Debug;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates once the best score has not improved for a number of steps.
///
/// # Example
///
/// ```
/// use talkforge_solver::termination::UnimprovedStepCountTermination;
///
/// // Terminate after 100 steps without a new best schedule
/// let term = UnimprovedStepCountTermination::new(100);
/// ```
#[derive(Debug, Clone)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for UnimprovedStepCountTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool {
        solver_scope.steps_since_improvement() >= self.limit
    }
}

//! Termination conditions for the solver.
//!
//! Terminations are checked between local search steps and every few move
//! evaluations inside a step. The construction heuristic always runs to
//! completion.

mod best_score;
mod composite;
mod external;
mod step_count;
mod time;
mod unimproved;

use std::fmt::Debug;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use talkforge_config::{ConfigError, SolverConfig};

use crate::scope::SolverScope;

pub use best_score::BestScoreTermination;
pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedStepCountTermination;

/// Trait for determining when to stop solving.
///
/// Implementations only read the scope, so one termination can be shared
/// by all parallel runs of a solve.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool;
}

/// An absent termination never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool {
        self.as_ref()
            .is_some_and(|termination| termination.is_terminated(solver_scope))
    }
}

/// The termination every solve runs with: a deadline, the optional limits
/// from the configuration, and the terminate-early flag.
pub type SolverTermination = OrTermination<(
    TimeTermination,
    Option<StepCountTermination>,
    Option<UnimprovedStepCountTermination>,
    Option<BestScoreTermination>,
    ExternalTermination,
)>;

/// Builds the solve termination from configuration.
///
/// The time limit always applies, falling back to
/// [`talkforge_config::DEFAULT_TIME_LIMIT`].
pub fn build_termination(
    config: &SolverConfig,
    terminate_early_flag: Arc<AtomicBool>,
) -> Result<SolverTermination, ConfigError> {
    let termination = config.termination.as_ref();
    let step_count = termination
        .and_then(|t| t.step_count_limit)
        .map(StepCountTermination::new);
    let unimproved = termination
        .and_then(|t| t.unimproved_step_count_limit)
        .map(UnimprovedStepCountTermination::new);
    let best_score = config.best_score_limit()?.map(BestScoreTermination::new);

    Ok(OrTermination((
        TimeTermination::new(config.time_limit()),
        step_count,
        unimproved,
        best_score,
        ExternalTermination::new(terminate_early_flag),
    )))
}

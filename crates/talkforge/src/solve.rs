//! Solver entry point that hides the configuration wiring.

use talkforge_config::{ConfigError, SolverConfig};
use talkforge_core::ConferenceProblem;
use talkforge_solver::{SolveError, SolveResult, Solver};

/// Configuration file read by [`solve`] from the working directory.
pub const CONFIG_FILE: &str = "solver.toml";

/// Solves a problem with the configuration in [`CONFIG_FILE`], or the
/// defaults when that file does not exist.
///
/// # Errors
///
/// A config file that exists but does not parse or validate is reported as
/// `SolveError::Config`, as are the errors of [`Solver::solve`].
pub fn solve(problem: ConferenceProblem) -> Result<SolveResult, SolveError> {
    #[cfg(feature = "console")]
    crate::console::init();

    let config = match SolverConfig::load(CONFIG_FILE) {
        Ok(config) => config,
        Err(ConfigError::Io(_)) => SolverConfig::default(),
        Err(err) => return Err(err.into()),
    };
    tracing::debug!(event = "config", run_count = config.run_count, seed = ?config.random_seed);

    Solver::new(config).solve(problem)
}

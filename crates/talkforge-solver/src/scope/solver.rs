//! Solver-level scope.

use std::fmt;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use talkforge_config::EnvironmentMode;
use talkforge_core::{HardMediumSoftScore, HardSoftScore, Schedule};
use talkforge_scoring::ScoreDirector;

use crate::stats::SolverStats;
use crate::termination::Termination;

/// An incrementally maintained score that disagreed with a full
/// recalculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCorruption {
    pub step: u64,
    pub incremental: HardSoftScore,
    pub recalculated: HardSoftScore,
}

impl fmt::Display for ScoreCorruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "incremental score {} differs from recalculated score {} after step {}",
            self.incremental, self.recalculated, self.step
        )
    }
}

/// Top-level scope for one run of the solver.
///
/// Owns the score director and the run's random number generator, and
/// remembers the best schedule seen so far.
pub struct SolverScope<'t> {
    score_director: ScoreDirector,
    best_solution: Option<Schedule>,
    best_score: Option<HardMediumSoftScore>,
    rng: ChaCha8Rng,
    seed: u64,
    run_index: usize,
    start_time: Option<Instant>,
    total_step_count: u64,
    best_step_count: u64,
    stats: SolverStats,
    termination: Option<&'t dyn Termination>,
    environment_mode: EnvironmentMode,
    corruption: Option<ScoreCorruption>,
}

impl<'t> SolverScope<'t> {
    pub fn new(score_director: ScoreDirector, seed: u64) -> Self {
        Self {
            score_director,
            best_solution: None,
            best_score: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            run_index: 0,
            start_time: None,
            total_step_count: 0,
            best_step_count: 0,
            stats: SolverStats::default(),
            termination: None,
            environment_mode: EnvironmentMode::default(),
            corruption: None,
        }
    }

    pub fn with_termination(mut self, termination: &'t dyn Termination) -> Self {
        self.termination = Some(termination);
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn with_run_index(mut self, run_index: usize) -> Self {
        self.run_index = run_index;
        self
    }

    /// Starts the clock and records the initial schedule as best.
    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.total_step_count = 0;
        self.best_step_count = 0;
        self.stats.start();
        self.update_best_solution();
    }

    /// Stops the clock and folds the director's counters into the stats.
    pub fn finish_solving(&mut self) {
        self.stats
            .record_score_calculations(self.score_director.calculation_count());
        self.stats.finish();
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run_index(&self) -> usize {
        self.run_index
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    pub fn score_director(&self) -> &ScoreDirector {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut ScoreDirector {
        &mut self.score_director
    }

    /// Splits the scope into the director and the random number generator.
    pub fn director_and_rng(&mut self) -> (&mut ScoreDirector, &mut ChaCha8Rng) {
        (&mut self.score_director, &mut self.rng)
    }

    pub fn working_solution(&self) -> &Schedule {
        self.score_director.working_solution()
    }

    /// Scores the working schedule the way the solver ranks schedules.
    pub fn calculate_score(&mut self) -> HardMediumSoftScore {
        self.score_director.calculate_score();
        self.score_director.planning_score()
    }

    pub fn best_solution(&self) -> Option<&Schedule> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<HardMediumSoftScore> {
        self.best_score
    }

    /// Copies the working schedule when it beats the best one.
    ///
    /// Returns true if the best schedule changed.
    pub fn update_best_solution(&mut self) -> bool {
        let current_score = self.calculate_score();
        let is_better = match self.best_score {
            None => true,
            Some(best) => current_score > best,
        };

        if is_better {
            if self.best_score.is_some() {
                self.stats.record_improvement();
            }
            self.best_solution = Some(self.score_director.clone_working_solution());
            self.best_score = Some(current_score);
            self.best_step_count = self.total_step_count;
        }
        is_better
    }

    /// Resets the working schedule to the best one.
    pub fn restore_best_solution(&mut self) {
        if let Some(best) = &self.best_solution {
            self.score_director.reset_to(best);
        }
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.stats.record_step();
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Steps taken since the best schedule last improved.
    pub fn steps_since_improvement(&self) -> u64 {
        self.total_step_count - self.best_step_count
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SolverStats {
        &mut self.stats
    }

    /// True once the termination fires or a score corruption was found.
    pub fn should_terminate(&self) -> bool {
        if self.corruption.is_some() {
            return true;
        }
        self.termination
            .is_some_and(|termination| termination.is_terminated(self))
    }

    /// Compares the incremental score with a full recalculation and
    /// remembers the first disagreement.
    pub fn assert_score_consistency(&mut self) {
        if self.corruption.is_some() {
            return;
        }
        let incremental = self.score_director.score();
        let recalculated = self.score_director.recalculate_score();
        if incremental != recalculated {
            tracing::error!(
                event = "score_corruption",
                step = self.total_step_count,
                incremental = %incremental,
                recalculated = %recalculated,
            );
            self.corruption = Some(ScoreCorruption {
                step: self.total_step_count,
                incremental,
                recalculated,
            });
        }
    }

    pub fn score_corruption(&self) -> Option<ScoreCorruption> {
        self.corruption
    }

    /// Consumes the scope, returning the best schedule, its score, and the
    /// run statistics.
    pub fn into_best(self) -> (Schedule, HardMediumSoftScore, SolverStats) {
        let score = self
            .best_score
            .unwrap_or_else(|| self.score_director.planning_score());
        let schedule = self
            .best_solution
            .unwrap_or_else(|| self.score_director.into_working_solution());
        (schedule, score, self.stats)
    }
}

impl fmt::Debug for SolverScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverScope")
            .field("run_index", &self.run_index)
            .field("seed", &self.seed)
            .field("best_score", &self.best_score)
            .field("total_step_count", &self.total_step_count)
            .finish()
    }
}

//! Solver orchestration.
//!
//! A solve runs construction and then local search in rounds until the
//! termination fires. Independent runs with different seeds execute in
//! parallel; the best final schedule wins.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use talkforge_config::{ConfigError, SolverConfig};
use talkforge_core::{
    CapacityWarning, ConferenceProblem, HardMediumSoftScore, HardSoftScore, Placement, Schedule,
};
use talkforge_scoring::{analyze, ScoreDirector, ScoreExplanation};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::phase::{Phase, SolverPhase};
use crate::scope::{ScoreCorruption, SolverScope};
use crate::stats::SolverStats;
use crate::termination::{build_termination, SolverTermination};

/// Lifecycle of a solve.
///
/// With several runs in parallel the state is the furthest any run has
/// reached, until all runs finish and the solver is `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SolverState {
    Idle = 0,
    Constructing = 1,
    Optimizing = 2,
    Done = 3,
}

impl SolverState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => SolverState::Constructing,
            2 => SolverState::Optimizing,
            3 => SolverState::Done,
            _ => SolverState::Idle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolverState::Idle => "IDLE",
            SolverState::Constructing => "CONSTRUCTING",
            SolverState::Optimizing => "OPTIMIZING",
            SolverState::Done => "DONE",
        }
    }
}

impl fmt::Display for SolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// No hard violations and every talk placed.
    OptimalOrFeasible,
    /// Hard violations remain or some talks are unassigned.
    InfeasiblePartial,
    /// Not a single talk could be placed.
    NoSolution,
}

impl SolveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::OptimalOrFeasible => "OPTIMAL_OR_FEASIBLE",
            SolveStatus::InfeasiblePartial => "INFEASIBLE_PARTIAL",
            SolveStatus::NoSolution => "NO_SOLUTION",
        }
    }

    fn of(score: &HardMediumSoftScore, placed_count: usize) -> Self {
        if placed_count == 0 {
            SolveStatus::NoSolution
        } else if score.is_complete_and_feasible() {
            SolveStatus::OptimalOrFeasible
        } else {
            SolveStatus::InfeasiblePartial
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a talk ended up without a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnassignedReason {
    /// The talk's speakers share no day with any timeslot.
    NoAvailableDay,
    /// Every pair on the speakers' days is taken.
    CapacityExhausted,
    /// Free pairs on the speakers' days exist but each breaks a hard rule.
    NoFeasiblePlacement,
}

impl fmt::Display for UnassignedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnassignedReason::NoAvailableDay => "no timeslot on a day all speakers attend",
            UnassignedReason::CapacityExhausted => "every compatible timeslot and room is taken",
            UnassignedReason::NoFeasiblePlacement => "every free placement breaks a hard rule",
        })
    }
}

/// A talk left without a placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnassignedTalk {
    pub talk_id: String,
    pub reason: UnassignedReason,
}

/// Errors that stop a solve.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("run {run_index}: {corruption}")]
    ScoreCorruption {
        run_index: usize,
        corruption: ScoreCorruption,
    },
}

/// The frozen result of a solve.
#[derive(Debug, Clone)]
pub struct SolveResult {
    schedule: Schedule,
    score: HardSoftScore,
    status: SolveStatus,
    unassigned: Vec<UnassignedTalk>,
    capacity_warning: Option<CapacityWarning>,
    stats: SolverStats,
    run_index: usize,
    seed: u64,
}

impl SolveResult {
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }

    pub fn score(&self) -> HardSoftScore {
        self.score
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Unassigned talks in talk order, each with its reason.
    pub fn unassigned(&self) -> &[UnassignedTalk] {
        &self.unassigned
    }

    pub fn capacity_warning(&self) -> Option<CapacityWarning> {
        self.capacity_warning
    }

    /// Statistics of the winning run.
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Index of the run that produced this schedule.
    pub fn run_index(&self) -> usize {
        self.run_index
    }

    /// Seed of the run that produced this schedule.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Breaks the score down per constraint and per talk.
    pub fn explain(&self) -> ScoreExplanation {
        analyze(&self.schedule)
    }
}

struct RunOutcome {
    run_index: usize,
    seed: u64,
    schedule: Schedule,
    score: HardMediumSoftScore,
    stats: SolverStats,
}

/// Seed of a run, derived from the solve's base seed. Run 0 uses the base
/// seed itself.
pub(crate) fn derive_run_seed(base_seed: u64, run_index: usize) -> u64 {
    base_seed ^ (run_index as u64).wrapping_mul(0x9E37_79B1_85EB_CA87)
}

/// The conference scheduling solver.
///
/// # Example
///
/// ```
/// use talkforge_config::SolverConfig;
/// use talkforge_solver::{SolveStatus, Solver, SolverState};
/// use talkforge_test::scenarios::shared_speaker;
///
/// let config = SolverConfig::new().with_random_seed(1).with_step_limit(50);
/// let solver = Solver::new(config);
/// let result = solver.solve(shared_speaker()).unwrap();
///
/// assert_eq!(result.status(), SolveStatus::OptimalOrFeasible);
/// assert_eq!(solver.state(), SolverState::Done);
/// ```
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    terminate_early_flag: Arc<AtomicBool>,
    solving: AtomicBool,
    state: AtomicU8,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
            solving: AtomicBool::new(false),
            state: AtomicU8::new(SolverState::Idle as u8),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn state(&self) -> SolverState {
        SolverState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Returns true if the solver is currently solving.
    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Requests early termination of the running solve.
    ///
    /// Thread-safe. Runs stop after the move they are evaluating. Returns
    /// false if no solve is running.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early_flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    /// Solves the problem.
    ///
    /// Infeasibility is reported in the result status, never as an error.
    ///
    /// # Errors
    ///
    /// `SolveError::Config` for an invalid configuration, and
    /// `SolveError::ScoreCorruption` when an asserting environment mode
    /// finds the incremental score out of sync.
    pub fn solve(
        &self,
        problem: impl Into<Arc<ConferenceProblem>>,
    ) -> Result<SolveResult, SolveError> {
        self.config.validate()?;
        let termination = build_termination(&self.config, self.terminate_early_flag.clone())?;
        let problem: Arc<ConferenceProblem> = problem.into();
        let base_seed = self.base_seed();
        let run_count = self.config.run_count;
        let start = Instant::now();

        self.terminate_early_flag.store(false, Ordering::SeqCst);
        self.state.store(SolverState::Idle as u8, Ordering::SeqCst);
        self.solving.store(true, Ordering::SeqCst);

        info!(
            event = "solve_start",
            talk_count = problem.talk_count(),
            timeslot_count = problem.timeslot_count(),
            room_count = problem.room_count(),
            run_count = run_count,
            seed = base_seed,
        );
        let capacity_warning = problem.capacity_warning();
        if let Some(warning) = capacity_warning {
            warn!(
                event = "capacity_warning",
                talk_count = warning.talk_count,
                capacity = warning.capacity,
                shortfall = warning.shortfall(),
            );
        }

        let outcomes: Vec<Result<RunOutcome, SolveError>> = (0..run_count)
            .into_par_iter()
            .map(|run_index| {
                self.run(
                    &problem,
                    run_index,
                    derive_run_seed(base_seed, run_index),
                    &termination,
                )
            })
            .collect();

        self.solving.store(false, Ordering::SeqCst);
        self.state.store(SolverState::Done as u8, Ordering::SeqCst);
        info!(event = "state", state = %SolverState::Done);

        let outcomes = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;
        let Some(best) = outcomes.into_iter().max_by(|a, b| {
            a.score
                .cmp(&b.score)
                .then_with(|| b.run_index.cmp(&a.run_index))
        }) else {
            return Err(ConfigError::Invalid("run_count must be at least 1".to_string()).into());
        };

        let placed_count = best.schedule.assignment().assigned_count();
        let status = SolveStatus::of(&best.score, placed_count);
        let unassigned = unassigned_talks(&best.schedule);
        let score = best.score.to_hard_soft();

        info!(
            event = "solve_end",
            status = %status,
            score = %score,
            unassigned = unassigned.len(),
            run = best.run_index,
            duration_ms = start.elapsed().as_millis() as u64,
        );

        Ok(SolveResult {
            schedule: best.schedule,
            score,
            status,
            unassigned,
            capacity_warning,
            stats: best.stats,
            run_index: best.run_index,
            seed: best.seed,
        })
    }

    fn base_seed(&self) -> u64 {
        match self.config.random_seed {
            Some(seed) => seed,
            None if self.config.environment_mode.is_reproducible() => 0,
            None => rand::random(),
        }
    }

    fn advance(&self, run_index: usize, state: SolverState) {
        let previous = self.state.fetch_max(state as u8, Ordering::SeqCst);
        if previous < state as u8 {
            info!(event = "state", run = run_index, state = %state);
        }
    }

    fn run(
        &self,
        problem: &Arc<ConferenceProblem>,
        run_index: usize,
        seed: u64,
        termination: &SolverTermination,
    ) -> Result<RunOutcome, SolveError> {
        let director = ScoreDirector::new(Schedule::new(Arc::clone(problem)));
        let mut scope = SolverScope::new(director, seed)
            .with_termination(termination)
            .with_environment_mode(self.config.environment_mode)
            .with_run_index(run_index);
        scope.start_solving();
        debug!(event = "run_start", run = run_index, seed = seed);

        for mut phase in SolverPhase::build_all(&self.config) {
            match &mut phase {
                SolverPhase::Construction(construction) => {
                    self.advance(run_index, SolverState::Constructing);
                    construction.solve(&mut scope);
                }
                SolverPhase::LocalSearch(local_search) => {
                    self.advance(run_index, SolverState::Optimizing);
                    while !scope.should_terminate() {
                        if scope.best_score() == Some(HardMediumSoftScore::ZERO) {
                            debug!(event = "perfect_score", run = run_index);
                            break;
                        }
                        local_search.solve(&mut scope);
                        if local_search.is_exhausted() {
                            break;
                        }
                    }
                }
            }
        }

        scope.finish_solving();
        if let Some(corruption) = scope.score_corruption() {
            return Err(SolveError::ScoreCorruption {
                run_index,
                corruption,
            });
        }

        let (schedule, score, stats) = scope.into_best();
        debug!(
            event = "run_end",
            run = run_index,
            score = %score,
            steps = stats.step_count,
            improvements = stats.improvements,
        );
        Ok(RunOutcome {
            run_index,
            seed,
            schedule,
            score,
            stats,
        })
    }
}

/// Lists the unassigned talks of a schedule with the reason each one has
/// no placement.
fn unassigned_talks(schedule: &Schedule) -> Vec<UnassignedTalk> {
    let problem = schedule.problem();
    let director = ScoreDirector::new(schedule.clone());

    schedule
        .unassigned_talks()
        .map(|talk| {
            let reason = if !problem.has_available_timeslot(talk) {
                UnassignedReason::NoAvailableDay
            } else {
                let has_free_pair = (0..problem.timeslot_count())
                    .filter(|&timeslot| problem.is_available(talk, timeslot))
                    .any(|timeslot| {
                        (0..problem.room_count())
                            .any(|room| director.is_free(Placement::new(timeslot, room)))
                    });
                if has_free_pair {
                    UnassignedReason::NoFeasiblePlacement
                } else {
                    UnassignedReason::CapacityExhausted
                }
            };
            UnassignedTalk {
                talk_id: problem.talk(talk).id.clone(),
                reason,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests;

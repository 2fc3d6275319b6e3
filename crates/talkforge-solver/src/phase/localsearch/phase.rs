//! Local search phase implementation.

use std::fmt::Debug;
use std::time::{Duration, Instant};

use talkforge_config::{EnvironmentMode, LocalSearchConfig};
use talkforge_core::HardMediumSoftScore;
use tracing::{debug, info, trace};

use super::{Acceptor, AcceptorBuilder, BestAcceptedForager, MoveTabuList};
use crate::heuristic::{NeighborhoodSelector, ScheduleMove};
use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};

const PHASE_NAME: &str = "Local Search";

/// Move evaluations between termination checks inside a step.
const TERMINATION_CHECK_INTERVAL: usize = 16;

const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Local search phase that improves an existing schedule.
///
/// One call to [`Phase::solve`] is one round: it restarts from the best
/// schedule, resets the acceptor and clears the tabu list, then takes up
/// to `step_limit` steps. Each step:
/// 1. Samples a neighborhood of moves
/// 2. Evaluates each move with do, score, undo
/// 3. Skips tabu moves unless they would beat the best score
/// 4. Applies the best move the acceptor accepts
///
/// A step in which no move is accepted still counts, so the temperature
/// keeps decaying.
pub struct LocalSearchPhase {
    phase_index: usize,
    selector: NeighborhoodSelector,
    acceptor: Box<dyn Acceptor>,
    forager: BestAcceptedForager,
    tabu: MoveTabuList,
    step_limit: Option<u64>,
    moves: Vec<ScheduleMove>,
    exhausted: bool,
}

impl LocalSearchPhase {
    pub fn new(
        phase_index: usize,
        selector: NeighborhoodSelector,
        acceptor: Box<dyn Acceptor>,
        tabu: MoveTabuList,
        step_limit: Option<u64>,
    ) -> Self {
        Self {
            phase_index,
            selector,
            acceptor,
            forager: BestAcceptedForager::new(),
            tabu,
            step_limit,
            moves: Vec::new(),
            exhausted: false,
        }
    }

    pub fn from_config(phase_index: usize, config: &LocalSearchConfig) -> Self {
        Self::new(
            phase_index,
            NeighborhoodSelector::new(config.neighborhood_size()),
            AcceptorBuilder::build(&config.acceptor()),
            MoveTabuList::new(config.move_tabu_size()),
            Some(config.restart_step_count()),
        )
    }

    /// True once a round found no candidate move at all. Further rounds
    /// cannot change the schedule.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Evaluates the neighborhood, returning false if termination
    /// interrupted the step.
    fn evaluate_moves(
        &mut self,
        phase_scope: &mut PhaseScope<'_, '_>,
        last_step_score: &HardMediumSoftScore,
    ) -> bool {
        let best_score = phase_scope.best_score().unwrap_or(*last_step_score);
        self.forager.step_started();

        for (index, candidate) in self.moves.iter().enumerate() {
            if index > 0
                && index % TERMINATION_CHECK_INTERVAL == 0
                && phase_scope.solver_scope().should_terminate()
            {
                return false;
            }

            let (director, rng) = phase_scope.solver_scope_mut().director_and_rng();
            if !candidate.is_doable(director) {
                continue;
            }
            let undo = candidate.do_move(director);
            director.calculate_score();
            let move_score = director.planning_score();
            undo.do_move(director);

            let accepted = if self.tabu.is_tabu(&candidate.key()) && move_score <= best_score {
                false
            } else {
                self.acceptor.is_accepted(last_step_score, &move_score, rng)
            };
            phase_scope.record_move(accepted);
            if accepted {
                self.forager.add_move_index(index, move_score);
            }
        }
        true
    }
}

impl Debug for LocalSearchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearchPhase")
            .field("phase_index", &self.phase_index)
            .field("selector", &self.selector)
            .field("acceptor", &self.acceptor)
            .field("tabu", &self.tabu)
            .field("step_limit", &self.step_limit)
            .finish()
    }
}

impl Phase for LocalSearchPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) {
        solver_scope.restore_best_solution();
        let mut phase_scope = PhaseScope::new(solver_scope, self.phase_index, PHASE_NAME);
        let phase_index = self.phase_index;

        let mut last_step_score = phase_scope.calculate_score();
        self.acceptor.phase_started(&last_step_score);
        self.tabu.clear();
        self.exhausted = false;

        info!(event = "phase_start", phase = PHASE_NAME, phase_index = phase_index);

        let full_assert =
            phase_scope.solver_scope().environment_mode() == EnvironmentMode::FullAssert;
        let mut last_progress_time = Instant::now();

        loop {
            if phase_scope.solver_scope().should_terminate() {
                break;
            }
            if let Some(limit) = self.step_limit {
                if phase_scope.step_count() >= limit {
                    break;
                }
            }

            {
                let (director, rng) = phase_scope.solver_scope_mut().director_and_rng();
                self.selector.fill(director, rng, &mut self.moves);
            }
            if self.moves.is_empty() {
                self.exhausted = true;
                debug!(event = "exhausted", phase = PHASE_NAME, phase_index = phase_index);
                break;
            }

            if !self.evaluate_moves(&mut phase_scope, &last_step_score) {
                break;
            }

            let step = phase_scope.increment_step_count();
            if let Some((selected_index, selected_score)) = self.forager.pick_move_index() {
                let selected = self.moves[selected_index];
                let undo = selected.do_move(phase_scope.score_director_mut());
                self.tabu.push(undo.key());
                last_step_score = selected_score;

                trace!(
                    event = "step",
                    step = step,
                    move_type = selected.move_type_name(),
                    applied = %selected,
                    score = %last_step_score,
                    accepted = true,
                );

                if phase_scope.update_best_solution() {
                    info!(
                        event = "new_best",
                        phase = PHASE_NAME,
                        step = phase_scope.solver_scope().total_step_count(),
                        score = %last_step_score,
                    );
                }
            } else {
                trace!(
                    event = "step",
                    step = step,
                    score = %last_step_score,
                    accepted = false,
                );
            }
            self.acceptor.step_ended(&last_step_score);

            if full_assert {
                phase_scope.solver_scope_mut().assert_score_consistency();
            }

            if last_progress_time.elapsed() >= PROGRESS_INTERVAL {
                let best_score = phase_scope.best_score().unwrap_or(last_step_score);
                debug!(
                    event = "progress",
                    steps = phase_scope.step_count(),
                    speed = phase_scope.stats().moves_per_second(),
                    score = %best_score,
                );
                last_progress_time = Instant::now();
            }
        }

        self.acceptor.phase_ended();
        if phase_scope.solver_scope().environment_mode().is_asserted() {
            phase_scope.solver_scope_mut().assert_score_consistency();
        }

        let best_score = phase_scope
            .best_score()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        info!(
            event = "phase_end",
            phase = PHASE_NAME,
            phase_index = phase_index,
            duration_ms = phase_scope.elapsed().as_millis() as u64,
            steps = phase_scope.step_count(),
            speed = phase_scope.stats().moves_per_second(),
            score = best_score,
        );
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}

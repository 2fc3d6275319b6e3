//! Construction heuristic phase
//!
//! Builds the initial schedule by placing talks one at a time, each into
//! the free (timeslot, room) pair that adds the fewest hard violations.

use std::fmt::Debug;

use talkforge_config::{ConstructionHeuristicConfig, EnvironmentMode, TalkOrder};
use talkforge_core::{ConferenceProblem, Placement};
use talkforge_scoring::ScoreDirector;
use tracing::{debug, info, trace};

use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};

const PHASE_NAME: &str = "Construction Heuristic";

/// Ranking of a candidate pair; lower is better.
///
/// Fields compare in order: hard violations added, whether the talk's
/// track already uses the room that day (0) or not (1), timeslot
/// position, room position by name.
type CandidateKey = (i64, u8, usize, usize);

/// Construction heuristic phase that builds an initial schedule.
///
/// Talks are placed in a fixed order. Each talk only goes to a free pair
/// on a day its speakers attend; a talk without such a pair stays
/// unassigned. The phase is deterministic and ignores termination, so
/// every run starts local search from the same schedule.
///
/// # Example
///
/// ```
/// use talkforge_config::TalkOrder;
/// use talkforge_solver::ConstructionHeuristicPhase;
/// use talkforge_test::scenarios::explicit_flow;
///
/// let phase = ConstructionHeuristicPhase::new(0, TalkOrder::TrackFlowId);
/// let problem = explicit_flow();
/// let order: Vec<&str> = phase
///     .placement_order(&problem)
///     .into_iter()
///     .map(|talk| problem.talk(talk).id.as_str())
///     .collect();
/// assert_eq!(order, ["first", "second", "third"]);
/// ```
#[derive(Debug, Clone)]
pub struct ConstructionHeuristicPhase {
    phase_index: usize,
    talk_order: TalkOrder,
}

impl ConstructionHeuristicPhase {
    pub fn new(phase_index: usize, talk_order: TalkOrder) -> Self {
        Self {
            phase_index,
            talk_order,
        }
    }

    pub fn from_config(phase_index: usize, config: &ConstructionHeuristicConfig) -> Self {
        Self::new(phase_index, config.talk_order)
    }

    /// Talk indices in the order they are placed.
    pub fn placement_order(&self, problem: &ConferenceProblem) -> Vec<usize> {
        let mut order: Vec<usize> = (0..problem.talk_count()).collect();
        if self.talk_order == TalkOrder::TrackFlowId {
            order.sort_by(|&a, &b| {
                let (a, b) = (problem.talk(a), problem.talk(b));
                a.track
                    .cmp(&b.track)
                    .then(a.flow_order.cmp(&b.flow_order))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        order
    }
}

/// Picks the best free pair for `talk`, returning it with the number of
/// candidates looked at.
fn best_placement(director: &ScoreDirector, talk: usize) -> (Option<Placement>, u64) {
    let problem = director.working_solution().problem();
    // Track-less talks still score as one shared track but get no room
    // affinity.
    let track = problem.talk(talk).has_track().then(|| problem.track_of(talk));
    let mut best: Option<(CandidateKey, Placement)> = None;
    let mut evaluated = 0;

    for (slot_rank, &timeslot) in problem.timeslots_in_order().iter().enumerate() {
        if !problem.is_available(talk, timeslot) {
            continue;
        }
        let day = problem.timeslot(timeslot).day_index;
        let track_rooms = track.map(|track| director.talks_in_track_day(track, day));

        for (room_rank, &room) in problem.rooms_in_name_order().iter().enumerate() {
            let at = Placement::new(timeslot, room);
            if !director.is_free(at) {
                continue;
            }
            evaluated += 1;

            let added_hard = director.impact_at(talk, at).hard_violations();
            let affinity = match track_rooms {
                Some(peers)
                    if !peers
                        .iter()
                        .any(|&peer| director.placement(peer).is_some_and(|p| p.room == room)) =>
                {
                    1
                }
                _ => 0,
            };
            let key = (added_hard, affinity, slot_rank, room_rank);
            if best.as_ref().map_or(true, |(best_key, _)| key < *best_key) {
                best = Some((key, at));
            }
        }
    }
    (best.map(|(_, at)| at), evaluated)
}

impl Phase for ConstructionHeuristicPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) {
        let mut phase_scope = PhaseScope::new(solver_scope, self.phase_index, PHASE_NAME);
        let phase_index = self.phase_index;

        info!(event = "phase_start", phase = PHASE_NAME, phase_index = phase_index);

        let order = self.placement_order(phase_scope.score_director().working_solution().problem());
        for talk in order {
            if phase_scope.score_director().placement(talk).is_some() {
                continue;
            }

            let (choice, evaluated) = best_placement(phase_scope.score_director(), talk);
            for _ in 0..evaluated.saturating_sub(u64::from(choice.is_some())) {
                phase_scope.record_move(false);
            }

            let Some(at) = choice else {
                let problem = phase_scope.score_director().working_solution().problem();
                debug!(
                    event = "unplaced",
                    phase = PHASE_NAME,
                    talk = problem.talk(talk).id.as_str(),
                    candidates = evaluated,
                );
                continue;
            };

            phase_scope.record_move(true);
            phase_scope.score_director_mut().assign(talk, Some(at));
            let step = phase_scope.increment_step_count();

            let problem = phase_scope.score_director().working_solution().problem();
            trace!(
                event = "step",
                step = step,
                talk = problem.talk(talk).id.as_str(),
                timeslot = problem.timeslot(at.timeslot).id.as_str(),
                room = problem.room(at.room).id.as_str(),
                score = %phase_scope.score_director().score(),
            );

            if phase_scope.solver_scope().environment_mode() == EnvironmentMode::FullAssert {
                phase_scope.solver_scope_mut().assert_score_consistency();
            }
        }

        phase_scope.update_best_solution();
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
        "ConstructionHeuristic"
    }
}

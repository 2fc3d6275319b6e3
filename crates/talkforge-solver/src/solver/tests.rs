//! Tests for the solver orchestration.

use std::thread;
use std::time::{Duration, Instant};

use talkforge_config::{
    ConstructionHeuristicConfig, EnvironmentMode, LocalSearchConfig, PhaseConfig, SolverConfig,
    TalkOrder,
};
use talkforge_core::{Availability, HardMediumSoftScore, HardSoftScore, ProblemBuilder, Room, TalkEntry};
use talkforge_scoring::ScoreDirector;
use talkforge_test::{empty_schedule, hour_slot, sample_conference, scenarios};

use super::*;
use crate::phase::construction::ConstructionHeuristicPhase;

fn config(seed: u64, steps: u64) -> SolverConfig {
    SolverConfig::new()
        .with_random_seed(seed)
        .with_step_limit(steps)
}

fn placed_timeslot(result: &SolveResult, talk_id: &str) -> Option<usize> {
    let schedule = result.schedule();
    let talk = schedule.problem().talk_index(talk_id).unwrap();
    schedule.placement(talk).map(|p| p.timeslot)
}

fn planning_score(result: &SolveResult) -> HardMediumSoftScore {
    HardMediumSoftScore::from_parts(result.score(), result.unassigned().len())
}

#[test]
fn test_capacity_shortfall_reports_one_unassigned_talk() {
    let result = Solver::new(config(0, 100))
        .solve(scenarios::capacity_shortfall())
        .unwrap();

    assert_eq!(result.status(), SolveStatus::InfeasiblePartial);
    assert_eq!(result.score(), HardSoftScore::ZERO);
    assert_eq!(result.unassigned().len(), 1);
    assert_eq!(result.unassigned()[0].reason, UnassignedReason::CapacityExhausted);
    assert_eq!(result.capacity_warning().map(|w| w.shortfall()), Some(1));
}

#[test]
fn test_shared_speaker_is_feasible() {
    let solver = Solver::new(config(0, 100));
    let result = solver.solve(scenarios::shared_speaker()).unwrap();

    assert_eq!(result.status(), SolveStatus::OptimalOrFeasible);
    assert_eq!(result.score(), HardSoftScore::ZERO);
    assert!(result.unassigned().is_empty());
    assert_ne!(placed_timeslot(&result, "t1"), placed_timeslot(&result, "t2"));
    assert_eq!(result.explain().total_match_count(), 0);
}

#[test]
fn test_level_flow_puts_beginner_first() {
    let result = Solver::new(config(0, 100)).solve(scenarios::level_flow()).unwrap();

    assert_eq!(result.status(), SolveStatus::OptimalOrFeasible);
    assert_eq!(result.score(), HardSoftScore::ZERO);
    assert_eq!(placed_timeslot(&result, "beg"), Some(0));
    assert_eq!(placed_timeslot(&result, "adv"), Some(1));
}

#[test]
fn test_local_search_repairs_inverted_level_flow() {
    // declared order places the advanced talk first
    let mut scope = SolverScope::new(ScoreDirector::new(empty_schedule(scenarios::level_flow())), 0);
    scope.start_solving();
    ConstructionHeuristicPhase::new(0, TalkOrder::Declared).solve(&mut scope);
    assert_eq!(scope.score_director().score(), HardSoftScore::penalty(0, 2));

    let config = config(3, 200)
        .with_phase(PhaseConfig::ConstructionHeuristic(ConstructionHeuristicConfig {
            talk_order: TalkOrder::Declared,
        }))
        .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig::default()));
    let result = Solver::new(config).solve(scenarios::level_flow()).unwrap();

    assert_eq!(result.status(), SolveStatus::OptimalOrFeasible);
    assert_eq!(result.score(), HardSoftScore::ZERO);
    assert_eq!(placed_timeslot(&result, "beg"), Some(0));
    assert_eq!(placed_timeslot(&result, "adv"), Some(1));
    assert!(result.stats().improvements >= 1);
}

#[test]
fn test_absent_speaker_talk_has_no_available_day() {
    let result = Solver::new(config(0, 100))
        .solve(scenarios::absent_speaker())
        .unwrap();

    assert_eq!(result.status(), SolveStatus::InfeasiblePartial);
    assert_eq!(result.score().hard_violations(), 0);
    assert_eq!(
        result.unassigned(),
        &[UnassignedTalk {
            talk_id: "t1".to_string(),
            reason: UnassignedReason::NoAvailableDay,
        }]
    );
    assert!(placed_timeslot(&result, "t2").is_some());
}

#[test]
fn test_no_placeable_talk_is_no_solution() {
    let problem = ProblemBuilder::new()
        .timeslot(hour_slot("s1", 0, 9))
        .room(Room::new("r1", "Main Hall"))
        .talk(TalkEntry::new("t1", "Closures").speaker("Ivy", Availability::from_days([2])))
        .build()
        .unwrap();

    let result = Solver::new(config(0, 10)).solve(problem).unwrap();

    assert_eq!(result.status(), SolveStatus::NoSolution);
    assert_eq!(result.schedule().assignment().assigned_count(), 0);
}

#[test]
fn test_same_seed_same_schedule() {
    let first = Solver::new(config(11, 300)).solve(sample_conference()).unwrap();
    let second = Solver::new(config(11, 300)).solve(sample_conference()).unwrap();

    assert_eq!(first.score(), second.score());
    assert_eq!(first.schedule().assignment(), second.schedule().assignment());
    assert_eq!(first.seed(), 11);
}

#[test]
fn test_never_worse_than_construction() {
    let mut scope = SolverScope::new(ScoreDirector::new(empty_schedule(sample_conference())), 0);
    scope.start_solving();
    ConstructionHeuristicPhase::new(0, TalkOrder::TrackFlowId).solve(&mut scope);
    let constructed = scope.calculate_score();

    let result = Solver::new(config(5, 500)).solve(sample_conference()).unwrap();

    assert!(planning_score(&result) >= constructed);
}

#[test]
fn test_parallel_runs_keep_the_best() {
    let single = Solver::new(config(7, 300)).solve(sample_conference()).unwrap();
    let parallel = Solver::new(config(7, 300).with_run_count(3))
        .solve(sample_conference())
        .unwrap();

    assert!(parallel.run_index() < 3);
    assert_eq!(parallel.seed(), derive_run_seed(7, parallel.run_index()));
    assert!(planning_score(&parallel) >= planning_score(&single));
}

#[test]
fn test_run_seeds_differ() {
    assert_eq!(derive_run_seed(42, 0), 42);
    assert_ne!(derive_run_seed(42, 1), derive_run_seed(42, 2));
}

#[test]
fn test_full_assert_finds_no_corruption() {
    let mut config = config(3, 150);
    config.environment_mode = EnvironmentMode::FullAssert;

    let result = Solver::new(config).solve(sample_conference());

    assert!(result.is_ok());
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = Solver::new(SolverConfig::new().with_run_count(0)).solve(scenarios::shared_speaker());

    assert!(matches!(result, Err(SolveError::Config(_))));
}

#[test]
fn test_state_moves_from_idle_to_done() {
    let solver = Solver::new(config(0, 20));
    assert_eq!(solver.state(), SolverState::Idle);
    assert!(!solver.is_solving());
    assert!(!solver.terminate_early());

    solver.solve(scenarios::shared_speaker()).unwrap();

    assert_eq!(solver.state(), SolverState::Done);
    assert!(!solver.is_solving());
}

#[test]
fn test_terminate_early_stops_a_long_solve() {
    let solver = Solver::new(
        SolverConfig::new()
            .with_random_seed(3)
            .with_termination_seconds(60),
    );
    let start = Instant::now();

    let result = thread::scope(|s| {
        let handle = s.spawn(|| solver.solve(sample_conference()));
        while !solver.terminate_early() && !handle.is_finished() {
            thread::sleep(Duration::from_millis(5));
        }
        handle.join().unwrap()
    });

    assert!(result.is_ok());
    assert!(start.elapsed() < Duration::from_secs(60));
    assert_eq!(solver.state(), SolverState::Done);
}

#[test]
fn test_status_display() {
    assert_eq!(SolveStatus::OptimalOrFeasible.to_string(), "OPTIMAL_OR_FEASIBLE");
    assert_eq!(SolveStatus::InfeasiblePartial.to_string(), "INFEASIBLE_PARTIAL");
    assert_eq!(SolveStatus::NoSolution.to_string(), "NO_SOLUTION");
    assert_eq!(SolverState::Optimizing.to_string(), "OPTIMIZING");
}

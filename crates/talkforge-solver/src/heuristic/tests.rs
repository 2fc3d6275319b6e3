//! Tests for moves and neighborhood sampling.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use talkforge_core::{HardSoftScore, Placement};
use talkforge_scoring::ScoreDirector;
use talkforge_test::{empty_schedule, sample_conference, scenarios};

use super::*;

#[test]
fn test_change_move_undo_restores_placement() {
    let mut director = ScoreDirector::new(empty_schedule(scenarios::shared_speaker()));
    director.assign(0, Some(Placement::new(0, 0)));

    let m = ChangeMove::new(1, Placement::new(0, 0));
    assert!(m.is_doable(&director));
    let undo = m.do_move(&mut director);
    assert_eq!(director.score(), HardSoftScore::penalty(3, 0));
    assert_eq!(undo, ChangeMove { talk: 1, to: None });

    undo.do_move(&mut director);
    assert_eq!(director.placement(1), None);
    assert_eq!(director.score(), HardSoftScore::ZERO);
}

#[test]
fn test_change_move_to_current_placement_is_not_doable() {
    let mut director = ScoreDirector::new(empty_schedule(scenarios::shared_speaker()));
    director.assign(0, Some(Placement::new(1, 0)));
    assert!(!ChangeMove::new(0, Placement::new(1, 0)).is_doable(&director));
}

#[test]
fn test_swap_move_is_its_own_undo() {
    let mut director = ScoreDirector::new(empty_schedule(scenarios::level_flow()));
    director.assign(0, Some(Placement::new(0, 0)));
    director.assign(1, Some(Placement::new(1, 0)));
    let before = director.score();

    let swap = ScheduleMove::from(SwapMove::new(0, 1));
    let undo = swap.do_move(&mut director);
    assert_eq!(director.score(), HardSoftScore::ZERO);
    undo.do_move(&mut director);
    assert_eq!(director.score(), before);
    assert_eq!(director.placement(0), Some(Placement::new(0, 0)));
}

#[test]
fn test_swap_between_unassigned_talks_is_not_doable() {
    let director = ScoreDirector::new(empty_schedule(scenarios::capacity_shortfall()));
    assert!(!SwapMove::new(0, 1).is_doable(&director));
    assert!(!SwapMove::new(2, 2).is_doable(&director));
}

#[test]
fn test_swap_key_ignores_order() {
    assert_eq!(SwapMove::new(4, 2).key(), SwapMove::new(2, 4).key());
    assert_ne!(
        ChangeMove::new(1, Placement::new(0, 0)).key(),
        ChangeMove::new(1, Placement::new(0, 1)).key()
    );
}

#[test]
fn test_selector_places_unassigned_talks_first() {
    let director = ScoreDirector::new(empty_schedule(scenarios::absent_speaker()));
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut moves = Vec::new();
    NeighborhoodSelector::new(8).fill(&director, &mut rng, &mut moves);

    // the absent speaker's talk has no day; only the second talk is offered
    // the two free pairs before any random draw
    assert_eq!(
        &moves[..2],
        &[
            ScheduleMove::Change(ChangeMove::new(1, Placement::new(0, 0))),
            ScheduleMove::Change(ChangeMove::new(1, Placement::new(1, 0))),
        ]
    );
    assert!(moves.iter().all(|m| m.is_doable(&director)));
}

#[test]
fn test_selector_is_deterministic_per_seed() {
    let mut director = ScoreDirector::new(empty_schedule(sample_conference()));
    for talk in 0..12 {
        director.assign(talk, Some(Placement::new(talk % 10, talk % 4)));
    }
    let selector = NeighborhoodSelector::new(32);

    let mut first = Vec::new();
    let mut second = Vec::new();
    selector.fill(&director, &mut ChaCha8Rng::seed_from_u64(5), &mut first);
    selector.fill(&director, &mut ChaCha8Rng::seed_from_u64(5), &mut second);
    assert_eq!(first, second);
    assert_eq!(first.len(), 32);
}

#[test]
fn test_selector_on_full_schedule_only_swaps() {
    let mut director = ScoreDirector::new(empty_schedule(scenarios::capacity_shortfall()));
    director.assign(0, Some(Placement::new(0, 0)));
    director.assign(1, Some(Placement::new(1, 0)));
    let mut moves = Vec::new();
    NeighborhoodSelector::new(16).fill(&director, &mut ChaCha8Rng::seed_from_u64(1), &mut moves);

    assert!(!moves.is_empty());
    assert!(moves.iter().all(|m| matches!(m, ScheduleMove::Swap(_))));
}

//! Tests for from-scratch evaluation.

use talkforge_core::Placement;
use talkforge_test::{empty_schedule, scenarios};

use super::*;

#[test]
fn test_empty_schedule_scores_zero() {
    let schedule = empty_schedule(scenarios::shared_speaker());
    assert_eq!(evaluate(&schedule), HardSoftScore::ZERO);
}

#[test]
fn test_unassigned_talks_are_exempt() {
    let mut schedule = empty_schedule(scenarios::absent_speaker());
    schedule.set_placement(1, Some(Placement::new(0, 0)));
    assert_eq!(evaluate(&schedule), HardSoftScore::ZERO);

    schedule.set_placement(0, Some(Placement::new(1, 0)));
    assert_eq!(evaluate(&schedule), HardSoftScore::penalty(1, 0));
}

#[test]
fn test_pairs_counted_once() {
    let mut schedule = empty_schedule(scenarios::capacity_shortfall());
    for talk in 0..3 {
        schedule.set_placement(talk, Some(Placement::new(0, 0)));
    }
    // three unordered pairs share the room and the empty track
    assert_eq!(evaluate(&schedule), HardSoftScore::penalty(6, 0));

    let counts = evaluate_by_constraint(&schedule);
    assert_eq!(counts[ConstraintKind::RoomConflict.index()], 3);
    assert_eq!(counts[ConstraintKind::TrackConflict.index()], 3);
    assert_eq!(counts.iter().sum::<i64>(), 6);
}

#[test]
fn test_explicit_flow_counts_all_pairs() {
    let mut schedule = empty_schedule(scenarios::explicit_flow());
    // declared order is third, second, first: placing them in declaration
    // order inverts every pair
    for talk in 0..3 {
        schedule.set_placement(talk, Some(Placement::new(talk, 0)));
    }
    let counts = evaluate_by_constraint(&schedule);
    assert_eq!(counts[ConstraintKind::OrderFlow.index()], 3);
    assert_eq!(counts[ConstraintKind::LevelFlow.index()], 0);

    schedule.set_placement(0, Some(Placement::new(2, 0)));
    schedule.set_placement(2, Some(Placement::new(0, 0)));
    assert_eq!(evaluate(&schedule), HardSoftScore::ZERO);
}

#[test]
fn test_trackless_talks_share_a_track() {
    let problem = talkforge_core::ProblemBuilder::new()
        .timeslot(talkforge_test::hour_slot("s1", 0, 9))
        .room(talkforge_core::Room::new("r1", "One"))
        .room(talkforge_core::Room::new("r2", "Two"))
        .talk(talkforge_core::TalkEntry::new("a", "A"))
        .talk(talkforge_core::TalkEntry::new("b", "B"))
        .build()
        .unwrap();
    let mut schedule = empty_schedule(problem);
    schedule.set_placement(0, Some(Placement::new(0, 0)));
    schedule.set_placement(1, Some(Placement::new(0, 1)));

    // parallel in different rooms: one track conflict, and the rooms differ
    // within the day
    assert_eq!(evaluate(&schedule), HardSoftScore::penalty(1, 1));
    let counts = evaluate_by_constraint(&schedule);
    assert_eq!(counts[ConstraintKind::TrackConflict.index()], 1);
    assert_eq!(counts[ConstraintKind::TrackRoomConsistency.index()], 1);
}

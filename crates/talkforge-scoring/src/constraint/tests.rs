//! Tests for individual constraint rules.

use talkforge_core::{Availability, ProblemBuilder, Room, TalkEntry};
use talkforge_test::{hour_slot, scenarios};

use super::*;

fn at(timeslot: usize, room: usize) -> Placement {
    Placement::new(timeslot, room)
}

#[test]
fn test_matches_impact_counts_levels() {
    let mut matches = ConstraintMatches::NONE;
    matches.insert(ConstraintKind::RoomConflict);
    matches.insert(ConstraintKind::SpeakerConflict);
    matches.insert(ConstraintKind::LevelFlow);

    assert_eq!(matches.impact(), HardSoftScore::penalty(2, 1));
    assert_eq!(
        matches.iter().collect::<Vec<_>>(),
        vec![
            ConstraintKind::RoomConflict,
            ConstraintKind::SpeakerConflict,
            ConstraintKind::LevelFlow
        ]
    );
}

#[test]
fn test_hard_and_soft_partition() {
    let hard: Vec<_> = ConstraintKind::ALL.iter().filter(|k| k.is_hard()).collect();
    assert_eq!(hard.len(), 4);
    for kind in ConstraintKind::ALL {
        assert_eq!(kind.weight().is_feasible(), !kind.is_hard());
    }
}

#[test]
fn test_room_and_speaker_conflict() {
    let problem = scenarios::shared_speaker();

    let same = hard_pair_matches(&problem, 0, at(0, 0), 1, at(0, 0));
    assert!(same.contains(ConstraintKind::RoomConflict));
    assert!(same.contains(ConstraintKind::SpeakerConflict));

    let apart = hard_pair_matches(&problem, 0, at(0, 0), 1, at(1, 0));
    assert!(apart.is_empty());
}

#[test]
fn test_speaker_conflict_across_rooms() {
    let problem = ProblemBuilder::new()
        .timeslot(hour_slot("s1", 0, 9))
        .room(Room::new("r1", "One"))
        .room(Room::new("r2", "Two"))
        .talk(TalkEntry::new("a", "A").speaker("Pat", Availability::AllDays))
        .talk(TalkEntry::new("b", "B").speaker("pat", Availability::AllDays))
        .build()
        .unwrap();

    let matches = hard_pair_matches(&problem, 0, at(0, 0), 1, at(0, 1));
    assert!(matches.contains(ConstraintKind::SpeakerConflict));
    assert!(!matches.contains(ConstraintKind::RoomConflict));
}

#[test]
fn test_track_conflict_includes_empty_track() {
    let problem = ProblemBuilder::new()
        .timeslot(hour_slot("s1", 0, 9))
        .room(Room::new("r1", "One"))
        .room(Room::new("r2", "Two"))
        .talk(TalkEntry::new("a", "A").track("Web"))
        .talk(TalkEntry::new("b", "B").track("Web"))
        .talk(TalkEntry::new("c", "C"))
        .talk(TalkEntry::new("d", "D"))
        .build()
        .unwrap();

    let tracked = hard_pair_matches(&problem, 0, at(0, 0), 1, at(0, 1));
    assert!(tracked.contains(ConstraintKind::TrackConflict));

    let trackless = hard_pair_matches(&problem, 2, at(0, 0), 3, at(0, 1));
    assert!(trackless.contains(ConstraintKind::TrackConflict));
    assert!(soft_pair_matches(&problem, 2, at(0, 0), 3, at(1, 1))
        .contains(ConstraintKind::TrackRoomConsistency));

    let mixed = hard_pair_matches(&problem, 0, at(0, 0), 2, at(0, 1));
    assert!(mixed.is_empty());
}

#[test]
fn test_availability_unary() {
    let problem = scenarios::absent_speaker();
    let matches = unary_matches(&problem, 0, at(0, 0));
    assert!(matches.contains(ConstraintKind::SpeakerAvailability));
    assert!(unary_matches(&problem, 1, at(0, 0)).is_empty());
}

#[test]
fn test_level_flow_and_default_flow_order() {
    // talk 0 is advanced (flow 3), talk 1 beginner (flow 1)
    let problem = scenarios::level_flow();

    let inverted = soft_pair_matches(&problem, 0, at(0, 0), 1, at(1, 0));
    assert!(inverted.contains(ConstraintKind::LevelFlow));
    assert!(inverted.contains(ConstraintKind::OrderFlow));
    assert!(!inverted.contains(ConstraintKind::TrackRoomConsistency));

    let symmetric = soft_pair_matches(&problem, 1, at(1, 0), 0, at(0, 0));
    assert_eq!(inverted, symmetric);

    let ordered = soft_pair_matches(&problem, 0, at(1, 1), 1, at(0, 0));
    assert!(!ordered.contains(ConstraintKind::LevelFlow));
    assert!(ordered.contains(ConstraintKind::TrackRoomConsistency));
}

#[test]
fn test_zero_flow_order_expresses_no_preference() {
    let problem = ProblemBuilder::new()
        .timeslot(hour_slot("s1", 0, 9))
        .timeslot(hour_slot("s2", 0, 10))
        .room(Room::new("r1", "One"))
        .talk(TalkEntry::new("a", "A").track("T").flow_order(0))
        .talk(TalkEntry::new("b", "B").track("T").flow_order(1))
        .talk(TalkEntry::new("c", "C").track("T").flow_order(5))
        .talk(TalkEntry::new("d", "D").track("T").flow_order(5))
        .build()
        .unwrap();

    let zero = soft_pair_matches(&problem, 1, at(1, 0), 0, at(0, 0));
    assert!(!zero.contains(ConstraintKind::OrderFlow));

    let equal = soft_pair_matches(&problem, 2, at(0, 0), 3, at(1, 0));
    assert!(!equal.contains(ConstraintKind::OrderFlow));
}

#[test]
fn test_soft_rules_are_per_day() {
    let problem = ProblemBuilder::new()
        .timeslot(hour_slot("mon", 0, 9))
        .timeslot(hour_slot("tue", 1, 9))
        .room(Room::new("r1", "One"))
        .room(Room::new("r2", "Two"))
        .talk(TalkEntry::new("a", "A").track("T").level(talkforge_core::AudienceLevel::Advanced))
        .talk(TalkEntry::new("b", "B").track("T").level(talkforge_core::AudienceLevel::Beginner))
        .build()
        .unwrap();

    assert!(soft_pair_matches(&problem, 0, at(0, 0), 1, at(1, 1)).is_empty());
}

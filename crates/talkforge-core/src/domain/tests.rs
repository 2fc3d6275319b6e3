//! Tests for domain facts, the builder and schedules.

use std::sync::Arc;

use super::*;
use crate::error::{ScheduleError, StructuralError};

fn slot(id: &str, day: u32, hour: u16) -> Timeslot {
    Timeslot::new(id, day, TimeOfDay::hm(hour, 0), TimeOfDay::hm(hour + 1, 0))
}

fn basic_builder() -> ProblemBuilder {
    ProblemBuilder::new()
        .timeslot(slot("d1-10", 0, 10))
        .timeslot(slot("d1-09", 0, 9))
        .timeslot(slot("d2-09", 1, 9))
        .room(Room::new("r-b", "Beta"))
        .room(Room::new("r-a", "Alpha"))
}

#[test]
fn test_slot_index_orders_days_first() {
    let late_day_one = slot("a", 0, 17);
    let early_day_two = slot("b", 1, 8);
    assert!(late_day_one.slot_index() < early_day_two.slot_index());
    assert_eq!(late_day_one.slot_index(), 17 * 60);
}

#[test]
fn test_slot_index_holds_for_any_day() {
    let last_day = slot("far", u32::MAX, 23);
    let day_before = slot("near", u32::MAX - 1, 23);
    assert!(day_before.slot_index() < last_day.slot_index());
    assert_eq!(last_day.slot_index(), u64::from(u32::MAX) * 10_000 + 23 * 60);
}

#[test]
fn test_time_of_day_wraps_large_hours() {
    assert_eq!(TimeOfDay::hm(24, 30), TimeOfDay::hm(0, 30));
    assert_eq!(TimeOfDay::hm(2_000, 0), TimeOfDay::hm(8, 0));
    assert_eq!(TimeOfDay::hm(u16::MAX, u16::MAX).minutes(), 195);
}

#[test]
fn test_day_display_fallback() {
    assert_eq!(slot("a", 2, 9).day_display(), "Day 3");
    assert_eq!(slot("a", 0, 9).with_day_label("Monday").day_display(), "Monday");
}

#[test]
fn test_time_of_day_parse() {
    assert_eq!("9:05".parse::<TimeOfDay>().unwrap(), TimeOfDay::hm(9, 5));
    assert!("25:00".parse::<TimeOfDay>().is_err());
    assert!("noon".parse::<TimeOfDay>().is_err());
}

#[test]
fn test_availability_intersection() {
    let all = Availability::AllDays;
    let mon_tue = Availability::from_days([0, 1]);
    let wed = Availability::from_days([2]);

    assert_eq!(all.intersect(&mon_tue), mon_tue);
    assert_eq!(mon_tue.intersect(&all), mon_tue);

    let never = mon_tue.intersect(&wed);
    assert!(never.is_never());
    assert!(!never.is_available_on(0));
    assert!(!never.is_available_on(2));
}

#[test]
fn test_level_defaults_and_flow_order() {
    let problem = basic_builder()
        .talk(TalkEntry::new("t1", "Intro").level(AudienceLevel::Beginner))
        .talk(TalkEntry::new("t2", "Mid"))
        .talk(TalkEntry::new("t3", "Custom").level(AudienceLevel::Advanced).flow_order(7))
        .build()
        .unwrap();

    assert_eq!(problem.talk(0).flow_order, 1);
    assert_eq!(problem.talk(1).level, AudienceLevel::Intermediate);
    assert_eq!(problem.talk(1).flow_order, 2);
    assert_eq!(problem.talk(2).flow_order, 7);
}

#[test]
fn test_speaker_merge_by_normalized_name() {
    let problem = basic_builder()
        .talk(TalkEntry::new("t1", "A").speaker("Grace Hopper", Availability::from_days([0, 1])))
        .talk(TalkEntry::new("t2", "B").speaker("grace hopper", Availability::AllDays))
        .talk(TalkEntry::new("t3", "C").speaker("Grace Hopper", Availability::from_days([1])))
        .build()
        .unwrap();

    assert_eq!(problem.speakers().len(), 1);
    let speaker = &problem.speakers()[0];
    assert_eq!(speaker.id, "grace_hopper");
    assert_eq!(speaker.name, "Grace Hopper");
    assert_eq!(speaker.availability, Availability::from_days([1]));
    assert!(problem.shares_speaker(0, 2));
    assert_eq!(problem.speaker_peers(1), &[0, 2]);
}

#[test]
fn test_talk_availability_is_intersection_of_speakers() {
    let problem = basic_builder()
        .talk(
            TalkEntry::new("t1", "Pair talk")
                .speaker("A", Availability::from_days([0, 1]))
                .speaker("B", Availability::from_days([1])),
        )
        .build()
        .unwrap();

    assert!(!problem.is_available(0, 0));
    assert!(problem.is_available(0, 2));
    assert!(problem.has_available_timeslot(0));
}

#[test]
fn test_structural_errors() {
    let err = basic_builder().build().unwrap_err();
    assert!(matches!(err, ScheduleError::Structural(StructuralError::NoTalks)));

    let err = ProblemBuilder::new()
        .room(Room::new("r", "R"))
        .talk(TalkEntry::new("t", "T"))
        .build()
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Structural(StructuralError::NoTimeslots)));

    let err = ProblemBuilder::new()
        .timeslot(slot("s", 0, 9))
        .talk(TalkEntry::new("t", "T"))
        .build()
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Structural(StructuralError::NoRooms)));
}

#[test]
fn test_duplicate_ids_rejected() {
    let err = basic_builder()
        .talk(TalkEntry::new("t1", "A"))
        .talk(TalkEntry::new("t1", "B"))
        .build()
        .unwrap_err();
    assert!(matches!(err, ScheduleError::DuplicateId { kind: "talk", .. }));
}

#[test]
fn test_inverted_timeslot_rejected() {
    let err = ProblemBuilder::new()
        .timeslot(Timeslot::new("bad", 0, TimeOfDay::hm(10, 0), TimeOfDay::hm(9, 0)))
        .room(Room::new("r", "R"))
        .talk(TalkEntry::new("t", "T"))
        .build()
        .unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidTime(_)));
}

#[test]
fn test_tracks_are_interned_including_empty() {
    let problem = basic_builder()
        .talk(TalkEntry::new("t1", "A").track("Rust"))
        .talk(TalkEntry::new("t2", "B"))
        .talk(TalkEntry::new("t3", "C").track("Rust"))
        .talk(TalkEntry::new("t4", "D").track(" Web "))
        .build()
        .unwrap();

    assert_eq!(problem.track_count(), 3);
    assert_eq!(problem.track_of(0), problem.track_of(2));
    assert_eq!(problem.track_name(problem.track_of(1)), "");
    assert!(!problem.talk(1).has_track());
    assert_eq!(problem.track_name(problem.track_of(3)), "Web");
}

#[test]
fn test_orderings_and_capacity() {
    let problem = basic_builder()
        .talks((0..7).map(|i| TalkEntry::new(format!("t{i}"), "Talk")))
        .build()
        .unwrap();

    assert_eq!(problem.timeslots_in_order(), &[1, 0, 2]);
    assert_eq!(problem.rooms_in_name_order(), &[1, 0]);
    assert_eq!(problem.capacity(), 6);
    let warning = problem.capacity_warning().unwrap();
    assert_eq!(warning.shortfall(), 1);
}

#[test]
fn test_schedule_entries_sorted() {
    let problem = Arc::new(
        basic_builder()
            .talk(TalkEntry::new("late", "Late"))
            .talk(TalkEntry::new("early-beta", "Early in Beta"))
            .talk(TalkEntry::new("early-alpha", "Early in Alpha"))
            .talk(TalkEntry::new("floating", "Not placed"))
            .build()
            .unwrap(),
    );
    let mut schedule = Schedule::new(problem);
    schedule.place_by_id("late", "d2-09", "r-a").unwrap();
    schedule.place_by_id("early-beta", "d1-09", "r-b").unwrap();
    schedule.place_by_id("early-alpha", "d1-09", "r-a").unwrap();

    let ids: Vec<&str> = schedule.entries().iter().map(|e| e.talk.id.as_str()).collect();
    assert_eq!(ids, vec!["early-alpha", "early-beta", "late", "floating"]);
    assert!(!schedule.is_complete());
    assert_eq!(schedule.unassigned_talks().collect::<Vec<_>>(), vec![3]);
    assert_eq!(schedule.placement_of("late"), Some(Placement::new(2, 1)));
    assert_eq!(schedule.placement_of("floating"), None);
    assert_eq!(schedule.placement_of("missing"), None);
}

#[test]
fn test_schedule_entries_order_rows() {
    let problem = Arc::new(
        basic_builder()
            .talk(TalkEntry::new("z-unplaced", "Unplaced first"))
            .talk(TalkEntry::new("ten-beta", "Ten in Beta"))
            .talk(TalkEntry::new("ten-alpha", "Ten in Alpha"))
            .talk(TalkEntry::new("nine-beta", "Nine in Beta"))
            .talk(TalkEntry::new("a-unplaced", "Unplaced last"))
            .build()
            .unwrap(),
    );
    let mut schedule = Schedule::new(problem);
    schedule.place_by_id("ten-beta", "d1-10", "r-b").unwrap();
    schedule.place_by_id("ten-alpha", "d1-10", "r-a").unwrap();
    schedule.place_by_id("nine-beta", "d1-09", "r-b").unwrap();

    let rows: Vec<(&str, Option<&str>, Option<&str>)> = schedule
        .entries()
        .iter()
        .map(|e| {
            (
                e.talk.id.as_str(),
                e.timeslot.map(|t| t.id.as_str()),
                e.room.map(|r| r.name.as_str()),
            )
        })
        .collect();
    // slot index first, declared slot order is ignored; rooms by name;
    // unassigned talks keep declaration order
    assert_eq!(
        rows,
        vec![
            ("nine-beta", Some("d1-09"), Some("Beta")),
            ("ten-alpha", Some("d1-10"), Some("Alpha")),
            ("ten-beta", Some("d1-10"), Some("Beta")),
            ("z-unplaced", None, None),
            ("a-unplaced", None, None),
        ]
    );
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "out of range")]
fn test_set_placement_rejects_unknown_room() {
    let problem = Arc::new(basic_builder().talk(TalkEntry::new("t", "T")).build().unwrap());
    let mut schedule = Schedule::new(problem);
    schedule.set_placement(0, Some(Placement::new(0, 2)));
}

#[test]
fn test_place_by_unknown_id() {
    let problem = Arc::new(basic_builder().talk(TalkEntry::new("t", "T")).build().unwrap());
    let mut schedule = Schedule::new(problem);
    let err = schedule.place_by_id("t", "nope", "r-a").unwrap_err();
    assert!(matches!(err, ScheduleError::UnknownReference { kind: "timeslot", .. }));
}

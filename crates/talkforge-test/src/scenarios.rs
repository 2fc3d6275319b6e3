//! Small problems with a known best outcome.

use talkforge_core::{
    AudienceLevel, Availability, ConferenceProblem, ProblemBuilder, Room, TalkEntry,
};

use crate::hour_slot;

/// 2 timeslots, 1 room and 3 unrelated talks: one talk cannot be placed.
pub fn capacity_shortfall() -> ConferenceProblem {
    ProblemBuilder::new()
        .timeslot(hour_slot("s1", 0, 9))
        .timeslot(hour_slot("s2", 0, 10))
        .room(Room::new("r1", "Main Hall"))
        .talk(TalkEntry::new("t1", "Ownership").speaker("Alice", Availability::AllDays))
        .talk(TalkEntry::new("t2", "Lifetimes").speaker("Bob", Availability::AllDays))
        .talk(TalkEntry::new("t3", "Traits").speaker("Carol", Availability::AllDays))
        .build()
        .expect("valid fixture")
}

/// 2 talks by the same speaker, 2 timeslots, 1 room.
pub fn shared_speaker() -> ConferenceProblem {
    ProblemBuilder::new()
        .timeslot(hour_slot("s1", 0, 9))
        .timeslot(hour_slot("s2", 0, 10))
        .room(Room::new("r1", "Main Hall"))
        .talk(TalkEntry::new("t1", "Async basics").speaker("Dana Scott", Availability::AllDays))
        .talk(TalkEntry::new("t2", "Async in depth").speaker("Dana Scott", Availability::AllDays))
        .build()
        .expect("valid fixture")
}

/// Track "A" with an advanced talk declared before a beginner talk, 2 slots
/// on the same day and 2 rooms.
pub fn level_flow() -> ConferenceProblem {
    ProblemBuilder::new()
        .timeslot(hour_slot("s1", 0, 9))
        .timeslot(hour_slot("s2", 0, 10))
        .room(Room::new("r1", "Main Hall"))
        .room(Room::new("r2", "Side Room"))
        .talk(
            TalkEntry::new("adv", "Unsafe Rust")
                .track("A")
                .level(AudienceLevel::Advanced)
                .speaker("Eve", Availability::AllDays),
        )
        .talk(
            TalkEntry::new("beg", "Hello Rust")
                .track("A")
                .level(AudienceLevel::Beginner)
                .speaker("Frank", Availability::AllDays),
        )
        .build()
        .expect("valid fixture")
}

/// A talk whose only speaker attends day 2 (index 1) while every slot is on
/// day 1, next to a talk that fits.
pub fn absent_speaker() -> ConferenceProblem {
    ProblemBuilder::new()
        .timeslot(hour_slot("s1", 0, 9))
        .timeslot(hour_slot("s2", 0, 10))
        .room(Room::new("r1", "Main Hall"))
        .talk(TalkEntry::new("t1", "Macros").speaker("Gina", Availability::from_days([1])))
        .talk(TalkEntry::new("t2", "Generics").speaker("Hank", Availability::AllDays))
        .build()
        .expect("valid fixture")
}

/// Three talks of one track in one day with explicit flow orders given in
/// reverse declaration order.
pub fn explicit_flow() -> ConferenceProblem {
    ProblemBuilder::new()
        .timeslot(hour_slot("s1", 0, 9))
        .timeslot(hour_slot("s2", 0, 10))
        .timeslot(hour_slot("s3", 0, 11))
        .room(Room::new("r1", "Main Hall"))
        .room(Room::new("r2", "Side Room"))
        .talk(TalkEntry::new("third", "Part 3").track("Series").flow_order(3))
        .talk(TalkEntry::new("second", "Part 2").track("Series").flow_order(2))
        .talk(TalkEntry::new("first", "Part 1").track("Series").flow_order(1))
        .build()
        .expect("valid fixture")
}

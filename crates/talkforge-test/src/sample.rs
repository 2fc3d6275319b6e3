//! A mid-sized conference used by property and solver tests.
//!
//! Two days, five slots per day, four rooms and thirty talks spread over
//! four tracks plus a few track-less talks. Several speakers give more
//! than one talk and a few are restricted to one day.

use talkforge_core::{
    AudienceLevel, Availability, ConferenceProblem, ProblemBuilder, Room, TalkEntry,
};

use crate::hour_slot;

const TRACKS: [&str; 4] = ["Systems", "Web", "Data", "Embedded"];
const SPEAKERS: [&str; 12] = [
    "Ada", "Brian", "Chen", "Dijkstra", "Emmy", "Fran", "Guido", "Hedy", "Ivan", "Joan", "Ken",
    "Linus",
];

pub const SAMPLE_TALK_COUNT: usize = 30;

/// Builds the sample conference. Same input every call.
pub fn sample_conference() -> ConferenceProblem {
    let mut builder = ProblemBuilder::new().rooms([
        Room::new("r1", "Auditorium"),
        Room::new("r2", "Bay"),
        Room::new("r3", "Cellar"),
        Room::new("r4", "Dome"),
    ]);
    for day in 0..2u32 {
        for (i, hour) in [9u16, 10, 11, 14, 15].into_iter().enumerate() {
            let label = if day == 0 { "Monday" } else { "Tuesday" };
            builder = builder.timeslot(
                hour_slot(&format!("d{day}-{i}"), day, hour).with_day_label(label),
            );
        }
    }

    for i in 0..SAMPLE_TALK_COUNT {
        let level = match i % 3 {
            0 => AudienceLevel::Advanced,
            1 => AudienceLevel::Beginner,
            _ => AudienceLevel::Intermediate,
        };
        let track = if i % 7 == 6 { "" } else { TRACKS[i % TRACKS.len()] };
        let speaker = SPEAKERS[(i * 5) % SPEAKERS.len()];
        let availability = match speaker {
            "Brian" => Availability::from_days([0]),
            "Hedy" => Availability::from_days([1]),
            _ => Availability::AllDays,
        };
        let mut talk = TalkEntry::new(format!("talk-{i:02}"), format!("Talk {i}"))
            .track(track)
            .level(level)
            .speaker(speaker, availability);
        if i % 5 == 0 {
            talk = talk.speaker(SPEAKERS[(i + 1) % SPEAKERS.len()], Availability::AllDays);
        }
        builder = builder.talk(talk);
    }

    builder.build().expect("valid fixture")
}

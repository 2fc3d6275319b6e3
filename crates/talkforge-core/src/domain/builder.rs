//! Problem construction and validation.

use std::collections::{HashMap, HashSet};

use smallvec::SmallVec;

use super::{AudienceLevel, Availability, ConferenceProblem, Room, Speaker, Talk, Timeslot};
use crate::error::{Result, ScheduleError, StructuralError};

/// Input row for one talk, with speakers named as declared by the source.
///
/// Each speaker carries the availability declared alongside this talk.
/// When the same speaker appears on several talks, the declarations are
/// intersected.
#[derive(Debug, Clone, Default)]
pub struct TalkEntry {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub track: String,
    pub level: AudienceLevel,
    pub flow_order: Option<u32>,
    pub speakers: Vec<(String, Availability)>,
}

impl TalkEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn track(mut self, track: impl Into<String>) -> Self {
        self.track = track.into();
        self
    }

    pub fn level(mut self, level: AudienceLevel) -> Self {
        self.level = level;
        self
    }

    /// Explicit flow order; defaults to the level rank.
    pub fn flow_order(mut self, flow_order: u32) -> Self {
        self.flow_order = Some(flow_order);
        self
    }

    pub fn speaker(mut self, name: impl Into<String>, availability: Availability) -> Self {
        self.speakers.push((name.into(), availability));
        self
    }
}

/// Collects facts and produces a validated `ConferenceProblem`.
///
/// # Examples
///
/// ```
/// use talkforge_core::{Availability, ProblemBuilder, Room, TalkEntry, TimeOfDay, Timeslot};
///
/// let problem = ProblemBuilder::new()
///     .timeslot(Timeslot::new("am", 0, TimeOfDay::hm(9, 0), TimeOfDay::hm(10, 0)))
///     .room(Room::new("r1", "Main Hall"))
///     .talk(TalkEntry::new("t1", "Intro").speaker("Ada Lovelace", Availability::from_days([0, 1])))
///     .talk(TalkEntry::new("t2", "Deep dive").speaker("Ada Lovelace", Availability::from_days([0])))
///     .build()
///     .unwrap();
///
/// assert_eq!(problem.speakers().len(), 1);
/// assert_eq!(problem.speakers()[0].availability, Availability::from_days([0]));
/// ```
#[derive(Debug, Default)]
pub struct ProblemBuilder {
    timeslots: Vec<Timeslot>,
    rooms: Vec<Room>,
    speakers: Vec<Speaker>,
    speaker_ids: HashMap<String, usize>,
    talks: Vec<TalkEntry>,
}

impl ProblemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeslot(mut self, timeslot: Timeslot) -> Self {
        self.timeslots.push(timeslot);
        self
    }

    pub fn timeslots(mut self, timeslots: impl IntoIterator<Item = Timeslot>) -> Self {
        self.timeslots.extend(timeslots);
        self
    }

    pub fn room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn rooms(mut self, rooms: impl IntoIterator<Item = Room>) -> Self {
        self.rooms.extend(rooms);
        self
    }

    /// Declares a speaker up front, merging with earlier declarations.
    pub fn speaker(mut self, name: &str, availability: Availability) -> Self {
        self.merge_speaker(name, &availability);
        self
    }

    pub fn talk(mut self, talk: TalkEntry) -> Self {
        self.talks.push(talk);
        self
    }

    pub fn talks(mut self, talks: impl IntoIterator<Item = TalkEntry>) -> Self {
        self.talks.extend(talks);
        self
    }

    /// Validates the collected facts.
    ///
    /// # Errors
    ///
    /// - `Structural` when there are no talks, timeslots, or rooms.
    /// - `DuplicateId` when two facts of one kind share an id.
    /// - `InvalidTime` when a timeslot does not end after it starts.
    pub fn build(mut self) -> Result<ConferenceProblem> {
        if self.talks.is_empty() {
            return Err(StructuralError::NoTalks.into());
        }
        if self.timeslots.is_empty() {
            return Err(StructuralError::NoTimeslots.into());
        }
        if self.rooms.is_empty() {
            return Err(StructuralError::NoRooms.into());
        }

        check_unique("timeslot", self.timeslots.iter().map(|t| t.id.as_str()))?;
        check_unique("room", self.rooms.iter().map(|r| r.id.as_str()))?;
        check_unique("talk", self.talks.iter().map(|t| t.id.as_str()))?;

        for slot in &self.timeslots {
            if slot.end <= slot.start {
                return Err(ScheduleError::InvalidTime(format!(
                    "timeslot '{}' ends at {} before it starts at {}",
                    slot.id, slot.end, slot.start
                )));
            }
        }

        let entries = std::mem::take(&mut self.talks);
        let mut talks = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut speakers: SmallVec<[usize; 2]> = SmallVec::new();
            for (name, availability) in &entry.speakers {
                if name.trim().is_empty() {
                    continue;
                }
                let idx = self.merge_speaker(name, availability);
                if !speakers.contains(&idx) {
                    speakers.push(idx);
                }
            }
            talks.push(Talk {
                id: entry.id,
                title: entry.title,
                summary: entry.summary,
                track: entry.track.trim().to_string(),
                flow_order: entry.flow_order.unwrap_or_else(|| entry.level.rank()),
                level: entry.level,
                speakers,
            });
        }

        Ok(ConferenceProblem::new(
            self.timeslots,
            self.rooms,
            self.speakers,
            talks,
        ))
    }

    fn merge_speaker(&mut self, name: &str, availability: &Availability) -> usize {
        let id = Speaker::id_for_name(name);
        match self.speaker_ids.get(&id) {
            Some(&idx) => {
                let speaker = &mut self.speakers[idx];
                speaker.availability = speaker.availability.intersect(availability);
                idx
            }
            None => {
                let idx = self.speakers.len();
                self.speakers
                    .push(Speaker::new(name.trim(), availability.clone()));
                self.speaker_ids.insert(id, idx);
                idx
            }
        }
    }
}

fn check_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ScheduleError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

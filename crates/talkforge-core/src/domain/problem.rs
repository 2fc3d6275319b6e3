//! Validated, indexed problem facts.

use std::collections::HashMap;
use std::fmt;

use super::{Availability, Room, Speaker, Talk, Timeslot};

/// More talks than (timeslot, room) pairs.
///
/// Not an error: the surplus talks stay unassigned and are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityWarning {
    pub talk_count: usize,
    pub capacity: usize,
}

impl CapacityWarning {
    /// Minimum number of talks that cannot be placed.
    pub fn shortfall(&self) -> usize {
        self.talk_count.saturating_sub(self.capacity)
    }
}

impl fmt::Display for CapacityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} talks but only {} (timeslot, room) pairs; at least {} will remain unassigned",
            self.talk_count,
            self.capacity,
            self.shortfall()
        )
    }
}

/// Immutable facts of one scheduling problem.
///
/// Built by `ProblemBuilder`. Besides the facts themselves it holds the
/// lookup structures the evaluator needs on every move: per-talk merged
/// speaker availability, talks sharing a speaker, and interned tracks.
#[derive(Debug, Clone)]
pub struct ConferenceProblem {
    timeslots: Vec<Timeslot>,
    rooms: Vec<Room>,
    speakers: Vec<Speaker>,
    talks: Vec<Talk>,
    talk_availability: Vec<Availability>,
    speaker_peers: Vec<Vec<usize>>,
    talk_tracks: Vec<usize>,
    track_names: Vec<String>,
    timeslot_order: Vec<usize>,
    room_order: Vec<usize>,
    talk_ids: HashMap<String, usize>,
    timeslot_ids: HashMap<String, usize>,
    room_ids: HashMap<String, usize>,
}

impl ConferenceProblem {
    pub(crate) fn new(
        timeslots: Vec<Timeslot>,
        rooms: Vec<Room>,
        speakers: Vec<Speaker>,
        talks: Vec<Talk>,
    ) -> Self {
        let talk_availability = talks
            .iter()
            .map(|talk| {
                talk.speakers
                    .iter()
                    .fold(Availability::AllDays, |acc, &s| {
                        acc.intersect(&speakers[s].availability)
                    })
            })
            .collect();

        let mut talks_by_speaker: Vec<Vec<usize>> = vec![Vec::new(); speakers.len()];
        for (t, talk) in talks.iter().enumerate() {
            for &s in &talk.speakers {
                talks_by_speaker[s].push(t);
            }
        }
        let speaker_peers = talks
            .iter()
            .enumerate()
            .map(|(t, talk)| {
                let mut peers: Vec<usize> = talk
                    .speakers
                    .iter()
                    .flat_map(|&s| talks_by_speaker[s].iter().copied())
                    .filter(|&other| other != t)
                    .collect();
                peers.sort_unstable();
                peers.dedup();
                peers
            })
            .collect();

        let mut track_names: Vec<String> = Vec::new();
        let mut track_index: HashMap<String, usize> = HashMap::new();
        let talk_tracks = talks
            .iter()
            .map(|talk| {
                let next = track_names.len();
                let idx = *track_index.entry(talk.track.clone()).or_insert(next);
                if idx == next {
                    track_names.push(talk.track.clone());
                }
                idx
            })
            .collect();

        let mut timeslot_order: Vec<usize> = (0..timeslots.len()).collect();
        timeslot_order.sort_by(|&a, &b| {
            timeslots[a]
                .slot_index()
                .cmp(&timeslots[b].slot_index())
                .then_with(|| timeslots[a].id.cmp(&timeslots[b].id))
        });

        let mut room_order: Vec<usize> = (0..rooms.len()).collect();
        room_order.sort_by(|&a, &b| {
            rooms[a]
                .name
                .cmp(&rooms[b].name)
                .then_with(|| rooms[a].id.cmp(&rooms[b].id))
        });

        let talk_ids = index_ids(talks.iter().map(|t| &t.id));
        let timeslot_ids = index_ids(timeslots.iter().map(|t| &t.id));
        let room_ids = index_ids(rooms.iter().map(|r| &r.id));

        Self {
            timeslots,
            rooms,
            speakers,
            talks,
            talk_availability,
            speaker_peers,
            talk_tracks,
            track_names,
            timeslot_order,
            room_order,
            talk_ids,
            timeslot_ids,
            room_ids,
        }
    }

    pub fn timeslots(&self) -> &[Timeslot] {
        &self.timeslots
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn speakers(&self) -> &[Speaker] {
        &self.speakers
    }

    pub fn talks(&self) -> &[Talk] {
        &self.talks
    }

    #[inline]
    pub fn talk(&self, talk: usize) -> &Talk {
        &self.talks[talk]
    }

    #[inline]
    pub fn timeslot(&self, timeslot: usize) -> &Timeslot {
        &self.timeslots[timeslot]
    }

    #[inline]
    pub fn room(&self, room: usize) -> &Room {
        &self.rooms[room]
    }

    pub fn talk_count(&self) -> usize {
        self.talks.len()
    }

    pub fn timeslot_count(&self) -> usize {
        self.timeslots.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of (timeslot, room) pairs.
    pub fn capacity(&self) -> usize {
        self.timeslots.len() * self.rooms.len()
    }

    pub fn capacity_warning(&self) -> Option<CapacityWarning> {
        (self.talks.len() > self.capacity()).then(|| CapacityWarning {
            talk_count: self.talks.len(),
            capacity: self.capacity(),
        })
    }

    /// Intersection of the availability of every speaker of the talk.
    #[inline]
    pub fn talk_availability(&self, talk: usize) -> &Availability {
        &self.talk_availability[talk]
    }

    /// True when all speakers of the talk can present on the timeslot's day.
    #[inline]
    pub fn is_available(&self, talk: usize, timeslot: usize) -> bool {
        self.talk_availability[talk].is_available_on(self.timeslots[timeslot].day_index)
    }

    /// Whether any timeslot at all suits the talk's speakers.
    pub fn has_available_timeslot(&self, talk: usize) -> bool {
        (0..self.timeslots.len()).any(|ts| self.is_available(talk, ts))
    }

    /// Other talks sharing at least one speaker with `talk`, sorted.
    #[inline]
    pub fn speaker_peers(&self, talk: usize) -> &[usize] {
        &self.speaker_peers[talk]
    }

    #[inline]
    pub fn shares_speaker(&self, a: usize, b: usize) -> bool {
        self.speaker_peers[a].binary_search(&b).is_ok()
    }

    /// Interned track of the talk. Talks without a track all share the
    /// empty track name and are scored like any other track.
    #[inline]
    pub fn track_of(&self, talk: usize) -> usize {
        self.talk_tracks[talk]
    }

    pub fn track_count(&self) -> usize {
        self.track_names.len()
    }

    pub fn track_name(&self, track: usize) -> &str {
        &self.track_names[track]
    }

    /// Timeslot indices sorted by slot index.
    pub fn timeslots_in_order(&self) -> &[usize] {
        &self.timeslot_order
    }

    /// Room indices sorted by room name.
    pub fn rooms_in_name_order(&self) -> &[usize] {
        &self.room_order
    }

    pub fn talk_index(&self, id: &str) -> Option<usize> {
        self.talk_ids.get(id).copied()
    }

    pub fn timeslot_index(&self, id: &str) -> Option<usize> {
        self.timeslot_ids.get(id).copied()
    }

    pub fn room_index(&self, id: &str) -> Option<usize> {
        self.room_ids.get(id).copied()
    }
}

fn index_ids<'a>(ids: impl Iterator<Item = &'a String>) -> HashMap<String, usize> {
    ids.enumerate().map(|(i, id)| (id.clone(), i)).collect()
}

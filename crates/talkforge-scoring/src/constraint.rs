//! The conference scheduling constraints.
//!
//! Every rule is expressed over at most two placed talks. Only pairs that
//! share a timeslot can break a hard rule and only pairs that share a track
//! and a day can miss a soft one, which is what lets the director evaluate
//! moves through small buckets instead of the whole schedule.

use std::fmt;

use talkforge_core::{ConferenceProblem, HardSoftScore, Placement};

/// A scheduling rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintKind {
    /// Two talks in the same room and timeslot.
    RoomConflict,
    /// Two talks sharing a speaker in the same timeslot.
    SpeakerConflict,
    /// Two talks of the same track in the same timeslot.
    TrackConflict,
    /// A talk on a day one of its speakers cannot attend.
    SpeakerAvailability,
    /// A higher-level talk before a lower-level one in the same track and day.
    LevelFlow,
    /// Explicit flow order inverted within a track and day.
    OrderFlow,
    /// Two talks of a track and day in different rooms.
    TrackRoomConsistency,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 7] = [
        ConstraintKind::RoomConflict,
        ConstraintKind::SpeakerConflict,
        ConstraintKind::TrackConflict,
        ConstraintKind::SpeakerAvailability,
        ConstraintKind::LevelFlow,
        ConstraintKind::OrderFlow,
        ConstraintKind::TrackRoomConsistency,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ConstraintKind::RoomConflict => "Room conflict",
            ConstraintKind::SpeakerConflict => "Speaker conflict",
            ConstraintKind::TrackConflict => "Track conflict",
            ConstraintKind::SpeakerAvailability => "Speaker availability",
            ConstraintKind::LevelFlow => "Educational flow by level",
            ConstraintKind::OrderFlow => "Educational flow by order",
            ConstraintKind::TrackRoomConsistency => "Track room consistency",
        }
    }

    pub const fn is_hard(self) -> bool {
        matches!(
            self,
            ConstraintKind::RoomConflict
                | ConstraintKind::SpeakerConflict
                | ConstraintKind::TrackConflict
                | ConstraintKind::SpeakerAvailability
        )
    }

    /// Score impact of one match.
    pub const fn weight(self) -> HardSoftScore {
        if self.is_hard() {
            HardSoftScore::ONE_HARD
        } else {
            HardSoftScore::ONE_SOFT
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of constraints matched by one talk or one pair of talks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConstraintMatches(u8);

impl ConstraintMatches {
    pub const NONE: ConstraintMatches = ConstraintMatches(0);

    #[inline]
    pub fn insert(&mut self, kind: ConstraintKind) {
        self.0 |= kind.bit();
    }

    #[inline]
    pub fn contains(self, kind: ConstraintKind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn union(self, other: ConstraintMatches) -> ConstraintMatches {
        ConstraintMatches(self.0 | other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = ConstraintKind> {
        ConstraintKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }

    /// Sum of the weights of every matched constraint.
    #[inline]
    pub fn impact(self) -> HardSoftScore {
        const HARD_MASK: u8 = 0b0000_1111;
        const SOFT_MASK: u8 = 0b0111_0000;
        HardSoftScore::penalty(
            i64::from((self.0 & HARD_MASK).count_ones()),
            i64::from((self.0 & SOFT_MASK).count_ones()),
        )
    }
}

/// Constraints broken by a single placed talk.
#[inline]
pub fn unary_matches(problem: &ConferenceProblem, talk: usize, at: Placement) -> ConstraintMatches {
    let mut matches = ConstraintMatches::NONE;
    if !problem.is_available(talk, at.timeslot) {
        matches.insert(ConstraintKind::SpeakerAvailability);
    }
    matches
}

/// Hard constraints broken by two distinct placed talks.
#[inline]
pub fn hard_pair_matches(
    problem: &ConferenceProblem,
    a: usize,
    at_a: Placement,
    b: usize,
    at_b: Placement,
) -> ConstraintMatches {
    let mut matches = ConstraintMatches::NONE;
    if at_a.timeslot != at_b.timeslot {
        return matches;
    }
    if at_a.room == at_b.room {
        matches.insert(ConstraintKind::RoomConflict);
    }
    if problem.shares_speaker(a, b) {
        matches.insert(ConstraintKind::SpeakerConflict);
    }
    if problem.track_of(a) == problem.track_of(b) {
        matches.insert(ConstraintKind::TrackConflict);
    }
    matches
}

/// Soft constraints missed by two distinct placed talks.
#[inline]
pub fn soft_pair_matches(
    problem: &ConferenceProblem,
    a: usize,
    at_a: Placement,
    b: usize,
    at_b: Placement,
) -> ConstraintMatches {
    let mut matches = ConstraintMatches::NONE;
    if problem.track_of(a) != problem.track_of(b) {
        return matches;
    }
    let slot_a = problem.timeslot(at_a.timeslot);
    let slot_b = problem.timeslot(at_b.timeslot);
    if slot_a.day_index != slot_b.day_index {
        return matches;
    }

    let (order_a, order_b) = (slot_a.slot_index(), slot_b.slot_index());
    let talk_a = problem.talk(a);
    let talk_b = problem.talk(b);

    if is_inverted(talk_a.level.rank(), talk_b.level.rank(), order_a, order_b) {
        matches.insert(ConstraintKind::LevelFlow);
    }
    let (flow_a, flow_b) = (talk_a.flow_order, talk_b.flow_order);
    if flow_a != 0 && flow_b != 0 && is_inverted(flow_a, flow_b, order_a, order_b) {
        matches.insert(ConstraintKind::OrderFlow);
    }
    if at_a.room != at_b.room {
        matches.insert(ConstraintKind::TrackRoomConsistency);
    }
    matches
}

/// All constraints matched by a pair.
#[inline]
pub fn pair_matches(
    problem: &ConferenceProblem,
    a: usize,
    at_a: Placement,
    b: usize,
    at_b: Placement,
) -> ConstraintMatches {
    hard_pair_matches(problem, a, at_a, b, at_b).union(soft_pair_matches(problem, a, at_a, b, at_b))
}

/// The higher-ranked talk is scheduled strictly earlier.
#[inline]
fn is_inverted(rank_a: u32, rank_b: u32, slot_a: u64, slot_b: u64) -> bool {
    (rank_a > rank_b && slot_a < slot_b) || (rank_b > rank_a && slot_b < slot_a)
}

#[cfg(test)]
mod tests;

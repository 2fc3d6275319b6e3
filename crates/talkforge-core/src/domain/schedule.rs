//! The planning structure: which talk sits in which (timeslot, room).

use std::sync::Arc;

use super::{ConferenceProblem, Room, Talk, Timeslot};
use crate::error::{Result, ScheduleError};

/// A (timeslot, room) pair, as indices into the problem facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placement {
    pub timeslot: usize,
    pub room: usize,
}

impl Placement {
    #[inline]
    pub const fn new(timeslot: usize, room: usize) -> Self {
        Self { timeslot, room }
    }
}

/// One optional placement per talk, indexed by talk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    placements: Vec<Option<Placement>>,
}

impl Assignment {
    /// An assignment with every talk unplaced.
    pub fn empty(talk_count: usize) -> Self {
        Self {
            placements: vec![None; talk_count],
        }
    }

    #[inline]
    pub fn get(&self, talk: usize) -> Option<Placement> {
        self.placements[talk]
    }

    /// Replaces the talk's placement, returning the previous one.
    #[inline]
    pub fn set(&mut self, talk: usize, placement: Option<Placement>) -> Option<Placement> {
        std::mem::replace(&mut self.placements[talk], placement)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<Placement>)> + '_ {
        self.placements.iter().copied().enumerate()
    }

    pub fn assigned_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_some()).count()
    }
}

/// One row of a rendered schedule.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleEntry<'a> {
    pub talk: &'a Talk,
    pub timeslot: Option<&'a Timeslot>,
    pub room: Option<&'a Room>,
}

/// Problem facts plus the assignment being planned.
///
/// Cloning is cheap on the fact side: facts are shared through an `Arc`
/// and only the assignment is copied.
#[derive(Debug, Clone)]
pub struct Schedule {
    problem: Arc<ConferenceProblem>,
    assignment: Assignment,
}

impl Schedule {
    /// A schedule with no talk placed.
    pub fn new(problem: Arc<ConferenceProblem>) -> Self {
        let assignment = Assignment::empty(problem.talk_count());
        Self {
            problem,
            assignment,
        }
    }

    pub fn problem(&self) -> &ConferenceProblem {
        &self.problem
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    #[inline]
    pub fn placement(&self, talk: usize) -> Option<Placement> {
        self.assignment.get(talk)
    }

    /// Sets a talk's placement, returning the old one.
    ///
    /// Indices must be in range for the problem; [`Schedule::place_by_id`]
    /// is the checked variant.
    #[inline]
    pub fn set_placement(&mut self, talk: usize, placement: Option<Placement>) -> Option<Placement> {
        if let Some(at) = placement {
            debug_assert!(
                at.timeslot < self.problem.timeslot_count() && at.room < self.problem.room_count(),
                "set_placement: {at:?} out of range for {} timeslots and {} rooms",
                self.problem.timeslot_count(),
                self.problem.room_count()
            );
        }
        self.assignment.set(talk, placement)
    }

    /// Placement of the talk with the given id, `None` for an unknown id.
    pub fn placement_of(&self, talk_id: &str) -> Option<Placement> {
        self.problem
            .talk_index(talk_id)
            .and_then(|talk| self.placement(talk))
    }

    /// Places a talk using fact identifiers.
    ///
    /// # Errors
    ///
    /// `UnknownReference` when any id names no fact.
    pub fn place_by_id(&mut self, talk_id: &str, timeslot_id: &str, room_id: &str) -> Result<()> {
        let talk = self
            .problem
            .talk_index(talk_id)
            .ok_or_else(|| unknown("talk", talk_id))?;
        let timeslot = self
            .problem
            .timeslot_index(timeslot_id)
            .ok_or_else(|| unknown("timeslot", timeslot_id))?;
        let room = self
            .problem
            .room_index(room_id)
            .ok_or_else(|| unknown("room", room_id))?;
        self.assignment
            .set(talk, Some(Placement::new(timeslot, room)));
        Ok(())
    }

    /// True when every talk holds a placement.
    pub fn is_complete(&self) -> bool {
        self.assignment.assigned_count() == self.assignment.len()
    }

    pub fn unassigned_talks(&self) -> impl Iterator<Item = usize> + '_ {
        self.assignment
            .iter()
            .filter_map(|(talk, placement)| placement.is_none().then_some(talk))
    }

    /// Rows ordered by slot index then room name, unassigned talks last in
    /// declaration order.
    pub fn entries(&self) -> Vec<ScheduleEntry<'_>> {
        let problem = &*self.problem;
        let mut placed: Vec<(usize, Placement)> = self
            .assignment
            .iter()
            .filter_map(|(talk, placement)| placement.map(|p| (talk, p)))
            .collect();
        placed.sort_by(|(ta, a), (tb, b)| {
            let sa = problem.timeslot(a.timeslot);
            let sb = problem.timeslot(b.timeslot);
            sa.slot_index()
                .cmp(&sb.slot_index())
                .then_with(|| problem.room(a.room).name.cmp(&problem.room(b.room).name))
                .then_with(|| ta.cmp(tb))
        });

        placed
            .into_iter()
            .map(|(talk, p)| ScheduleEntry {
                talk: problem.talk(talk),
                timeslot: Some(problem.timeslot(p.timeslot)),
                room: Some(problem.room(p.room)),
            })
            .chain(self.unassigned_talks().map(|talk| ScheduleEntry {
                talk: problem.talk(talk),
                timeslot: None,
                room: None,
            }))
            .collect()
    }
}

fn unknown(kind: &'static str, id: &str) -> ScheduleError {
    ScheduleError::UnknownReference {
        kind,
        id: id.to_string(),
    }
}

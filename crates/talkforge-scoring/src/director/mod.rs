//! Incremental score director.
//!
//! The director owns the working schedule and keeps the score current
//! through every change. Each change is bracketed by
//! `before_talk_changed`, which retracts the talk's constraint matches
//! against the rest of the schedule, and `after_talk_changed`, which
//! inserts the matches at its new placement. A talk only interacts with
//! talks in its timeslot (hard rules) and talks of its track on its day
//! (soft rules), so both brackets touch two small buckets.
//!
//! Alongside the score the director keeps, per talk, the number of hard
//! matches it takes part in, which lets move selection aim at conflicts
//! without rescanning the schedule.

use std::collections::HashMap;

use smallvec::SmallVec;
use talkforge_core::{HardMediumSoftScore, HardSoftScore, Placement, Schedule};

use crate::constraint::{hard_pair_matches, soft_pair_matches, unary_matches};
use crate::evaluator::evaluate;

type Bucket = SmallVec<[usize; 8]>;

/// Owns the working schedule and its incrementally maintained score.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use talkforge_core::{HardMediumSoftScore, HardSoftScore, Placement, Schedule};
/// use talkforge_scoring::{evaluate, ScoreDirector};
/// # use talkforge_core::{ProblemBuilder, Room, TalkEntry, TimeOfDay, Timeslot};
/// # let problem = ProblemBuilder::new()
/// #     .timeslot(Timeslot::new("am", 0, TimeOfDay::hm(9, 0), TimeOfDay::hm(10, 0)))
/// #     .room(Room::new("r1", "Main"))
/// #     .talk(TalkEntry::new("a", "A"))
/// #     .talk(TalkEntry::new("b", "B"))
/// #     .build()
/// #     .unwrap();
///
/// let mut director = ScoreDirector::new(Schedule::new(Arc::new(problem)));
/// director.assign(0, Some(Placement::new(0, 0)));
/// director.assign(1, Some(Placement::new(0, 0)));
///
/// // Room conflict, and a track conflict between two track-less talks.
/// assert_eq!(director.score(), HardSoftScore::penalty(2, 0));
/// assert_eq!(director.score(), evaluate(director.working_solution()));
/// ```
#[derive(Debug, Clone)]
pub struct ScoreDirector {
    working: Schedule,
    score: HardSoftScore,
    by_timeslot: Vec<Bucket>,
    by_track_day: HashMap<(usize, u32), Bucket>,
    conflicts: Vec<u32>,
    unassigned_count: usize,
    calculation_count: u64,
}

impl ScoreDirector {
    /// Takes ownership of a schedule, indexing the talks already placed.
    pub fn new(schedule: Schedule) -> Self {
        let timeslot_count = schedule.problem().timeslot_count();
        let talk_count = schedule.problem().talk_count();
        let mut director = Self {
            working: schedule,
            score: HardSoftScore::ZERO,
            by_timeslot: vec![Bucket::new(); timeslot_count],
            by_track_day: HashMap::new(),
            conflicts: vec![0; talk_count],
            unassigned_count: talk_count,
            calculation_count: 0,
        };
        for talk in 0..talk_count {
            director.after_talk_changed(talk);
        }
        director
    }

    pub fn working_solution(&self) -> &Schedule {
        &self.working
    }

    pub fn clone_working_solution(&self) -> Schedule {
        self.working.clone()
    }

    pub fn into_working_solution(self) -> Schedule {
        self.working
    }

    /// The current score, kept up to date by every change.
    #[inline]
    pub fn score(&self) -> HardSoftScore {
        self.score
    }

    /// Returns the current score and counts the calculation.
    #[inline]
    pub fn calculate_score(&mut self) -> HardSoftScore {
        self.calculation_count += 1;
        self.score
    }

    /// The score the solver ranks schedules by: constraint levels plus the
    /// number of unassigned talks as the medium level.
    #[inline]
    pub fn planning_score(&self) -> HardMediumSoftScore {
        HardMediumSoftScore::from_parts(self.score, self.unassigned_count)
    }

    #[inline]
    pub fn unassigned_count(&self) -> usize {
        self.unassigned_count
    }

    /// Recomputes the score from scratch, ignoring the cache.
    pub fn recalculate_score(&self) -> HardSoftScore {
        evaluate(&self.working)
    }

    pub fn calculation_count(&self) -> u64 {
        self.calculation_count
    }

    #[inline]
    pub fn placement(&self, talk: usize) -> Option<Placement> {
        self.working.placement(talk)
    }

    /// Moves a talk to `placement` (or unassigns it), returning its old
    /// placement.
    pub fn assign(&mut self, talk: usize, placement: Option<Placement>) -> Option<Placement> {
        self.before_talk_changed(talk);
        let old = self.working.set_placement(talk, placement);
        self.after_talk_changed(talk);
        old
    }

    /// Takes a talk out of the schedule, returning its old placement.
    pub fn unassign(&mut self, talk: usize) -> Option<Placement> {
        self.assign(talk, None)
    }

    /// Exchanges the placements of two talks.
    pub fn swap(&mut self, left: usize, right: usize) {
        if left == right {
            return;
        }
        self.before_talk_changed(left);
        self.before_talk_changed(right);
        let left_placement = self.working.placement(left);
        let right_placement = self.working.set_placement(right, left_placement);
        self.working.set_placement(left, right_placement);
        self.after_talk_changed(left);
        self.after_talk_changed(right);
    }

    /// Replaces the whole assignment, rebuilding indexes and score.
    pub fn reset_to(&mut self, schedule: &Schedule) {
        *self = ScoreDirector {
            calculation_count: self.calculation_count,
            ..ScoreDirector::new(schedule.clone())
        };
    }

    /// Contribution of the talk at its current placement.
    ///
    /// Pair matches are fully attributed to both talks, so summing over all
    /// talks counts every pair twice.
    pub fn talk_impact(&self, talk: usize) -> HardSoftScore {
        match self.working.placement(talk) {
            Some(at) => self.impact_at(talk, at),
            None => HardSoftScore::ZERO,
        }
    }

    /// Contribution the talk would have at `at`, against every other placed
    /// talk.
    pub fn impact_at(&self, talk: usize, at: Placement) -> HardSoftScore {
        let problem = self.working.problem();
        let mut impact = unary_matches(problem, talk, at).impact();

        for &other in &self.by_timeslot[at.timeslot] {
            if other == talk {
                continue;
            }
            if let Some(other_at) = self.working.placement(other) {
                impact += hard_pair_matches(problem, talk, at, other, other_at).impact();
            }
        }

        if let Some(bucket) = self.by_track_day.get(&self.track_day_key(talk, at)) {
            for &other in bucket {
                if other == talk {
                    continue;
                }
                if let Some(other_at) = self.working.placement(other) {
                    impact += soft_pair_matches(problem, talk, at, other, other_at).impact();
                }
            }
        }
        impact
    }

    /// Number of hard matches the talk takes part in at its placement.
    #[inline]
    pub fn hard_conflicts(&self, talk: usize) -> u32 {
        self.conflicts[talk]
    }

    /// Placed talks breaking at least one hard rule, in index order.
    pub fn conflicted_talks(&self) -> Vec<usize> {
        (0..self.conflicts.len())
            .filter(|&talk| self.conflicts[talk] > 0)
            .collect()
    }

    /// Every (timeslot, room) pair nobody occupies, timeslot-major.
    pub fn free_placements(&self) -> Vec<Placement> {
        let problem = self.working.problem();
        let room_count = problem.room_count();
        let mut free = Vec::new();
        let mut taken = vec![false; room_count];
        for (timeslot, bucket) in self.by_timeslot.iter().enumerate() {
            taken.iter_mut().for_each(|t| *t = false);
            for &talk in bucket {
                if let Some(at) = self.working.placement(talk) {
                    taken[at.room] = true;
                }
            }
            free.extend(
                (0..room_count)
                    .filter(|&room| !taken[room])
                    .map(|room| Placement::new(timeslot, room)),
            );
        }
        free
    }

    /// Talks currently placed in the timeslot.
    pub fn talks_in_timeslot(&self, timeslot: usize) -> &[usize] {
        &self.by_timeslot[timeslot]
    }

    /// Placed talks of a track on a day.
    pub fn talks_in_track_day(&self, track: usize, day_index: u32) -> &[usize] {
        self.by_track_day
            .get(&(track, day_index))
            .map(|bucket| bucket.as_slice())
            .unwrap_or(&[])
    }

    /// First talk holding exactly this (timeslot, room).
    pub fn occupant(&self, at: Placement) -> Option<usize> {
        self.by_timeslot[at.timeslot]
            .iter()
            .copied()
            .find(|&talk| self.working.placement(talk) == Some(at))
    }

    pub fn is_free(&self, at: Placement) -> bool {
        self.occupant(at).is_none()
    }

    fn before_talk_changed(&mut self, talk: usize) {
        let Some(at) = self.working.placement(talk) else {
            return;
        };
        let impact = self.impact_at(talk, at);
        self.score -= impact;
        self.unassigned_count += 1;
        self.shift_conflicts(talk, at, false);

        let bucket = &mut self.by_timeslot[at.timeslot];
        if let Some(pos) = bucket.iter().position(|&t| t == talk) {
            bucket.swap_remove(pos);
        }
        let key = self.track_day_key(talk, at);
        if let Some(bucket) = self.by_track_day.get_mut(&key) {
            if let Some(pos) = bucket.iter().position(|&t| t == talk) {
                bucket.swap_remove(pos);
            }
        }
    }

    fn after_talk_changed(&mut self, talk: usize) {
        let Some(at) = self.working.placement(talk) else {
            return;
        };
        let impact = self.impact_at(talk, at);
        self.score += impact;
        self.unassigned_count -= 1;
        self.shift_conflicts(talk, at, true);

        self.by_timeslot[at.timeslot].push(talk);
        let key = self.track_day_key(talk, at);
        self.by_track_day.entry(key).or_default().push(talk);
    }

    /// Adds (or retracts) the hard matches of `talk` at `at` to the conflict
    /// counts of every talk involved.
    fn shift_conflicts(&mut self, talk: usize, at: Placement, insert: bool) {
        let problem = self.working.problem();
        let apply = |count: &mut u32, by: u32| {
            if insert {
                *count += by;
            } else {
                *count -= by;
            }
        };

        let own = unary_matches(problem, talk, at).impact().hard_violations() as u32;
        let mut total = own;
        for &other in &self.by_timeslot[at.timeslot] {
            if other == talk {
                continue;
            }
            let Some(other_at) = self.working.placement(other) else {
                continue;
            };
            let hard = hard_pair_matches(problem, talk, at, other, other_at)
                .impact()
                .hard_violations() as u32;
            if hard > 0 {
                apply(&mut self.conflicts[other], hard);
                total += hard;
            }
        }
        apply(&mut self.conflicts[talk], total);
    }

    fn track_day_key(&self, talk: usize, at: Placement) -> (usize, u32) {
        let problem = self.working.problem();
        (problem.track_of(talk), problem.timeslot(at.timeslot).day_index)
    }
}

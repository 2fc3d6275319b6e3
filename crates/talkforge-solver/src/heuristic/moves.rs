//! Change and swap moves.
//!
//! Every move is applied through the score director and returns the move
//! that undoes it, so evaluating a candidate is do, score, undo.

use std::fmt;

use talkforge_core::Placement;
use talkforge_scoring::ScoreDirector;

/// Identifies a move for the tabu list.
///
/// Swaps are stored with their talks ordered, so swapping `a, b` and
/// `b, a` share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Change { talk: usize, to: Option<Placement> },
    Swap { low: usize, high: usize },
}

/// Moves one talk to another placement.
///
/// # Example
///
/// ```
/// use talkforge_core::Placement;
/// use talkforge_solver::ChangeMove;
///
/// let m = ChangeMove::new(3, Placement::new(0, 1));
/// assert_eq!(m.talk, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeMove {
    pub talk: usize,
    pub to: Option<Placement>,
}

impl ChangeMove {
    pub fn new(talk: usize, to: Placement) -> Self {
        Self { talk, to: Some(to) }
    }

    pub fn is_doable(&self, director: &ScoreDirector) -> bool {
        director.placement(self.talk) != self.to
    }

    /// Applies the move, returning the move that restores the old placement.
    pub fn do_move(&self, director: &mut ScoreDirector) -> ChangeMove {
        let old = director.assign(self.talk, self.to);
        ChangeMove {
            talk: self.talk,
            to: old,
        }
    }

    pub fn key(&self) -> MoveKey {
        MoveKey::Change {
            talk: self.talk,
            to: self.to,
        }
    }
}

/// Exchanges the placements of two talks. Either talk may be unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapMove {
    pub left: usize,
    pub right: usize,
}

impl SwapMove {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    pub fn is_doable(&self, director: &ScoreDirector) -> bool {
        self.left != self.right && director.placement(self.left) != director.placement(self.right)
    }

    /// Applies the move. A swap is its own undo.
    pub fn do_move(&self, director: &mut ScoreDirector) -> SwapMove {
        director.swap(self.left, self.right);
        *self
    }

    pub fn key(&self) -> MoveKey {
        MoveKey::Swap {
            low: self.left.min(self.right),
            high: self.left.max(self.right),
        }
    }
}

/// A move the local search can evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMove {
    Change(ChangeMove),
    Swap(SwapMove),
}

impl ScheduleMove {
    pub fn is_doable(&self, director: &ScoreDirector) -> bool {
        match self {
            ScheduleMove::Change(m) => m.is_doable(director),
            ScheduleMove::Swap(m) => m.is_doable(director),
        }
    }

    /// Applies the move, returning its undo move.
    pub fn do_move(&self, director: &mut ScoreDirector) -> ScheduleMove {
        match self {
            ScheduleMove::Change(m) => ScheduleMove::Change(m.do_move(director)),
            ScheduleMove::Swap(m) => ScheduleMove::Swap(m.do_move(director)),
        }
    }

    pub fn key(&self) -> MoveKey {
        match self {
            ScheduleMove::Change(m) => m.key(),
            ScheduleMove::Swap(m) => m.key(),
        }
    }

    pub fn move_type_name(&self) -> &'static str {
        match self {
            ScheduleMove::Change(_) => "ChangeMove",
            ScheduleMove::Swap(_) => "SwapMove",
        }
    }
}

impl From<ChangeMove> for ScheduleMove {
    fn from(m: ChangeMove) -> Self {
        ScheduleMove::Change(m)
    }
}

impl From<SwapMove> for ScheduleMove {
    fn from(m: SwapMove) -> Self {
        ScheduleMove::Swap(m)
    }
}

impl fmt::Display for ScheduleMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleMove::Change(ChangeMove { talk, to: Some(at) }) => write!(
                f,
                "talk {talk} -> (timeslot {}, room {})",
                at.timeslot, at.room
            ),
            ScheduleMove::Change(ChangeMove { talk, to: None }) => {
                write!(f, "talk {talk} -> unassigned")
            }
            ScheduleMove::Swap(SwapMove { left, right }) => write!(f, "talk {left} <-> talk {right}"),
        }
    }
}

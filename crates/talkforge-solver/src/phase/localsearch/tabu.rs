//! Move tabu list.

use std::collections::VecDeque;

use crate::heuristic::MoveKey;

/// Remembers the undo moves of the most recent steps.
///
/// A candidate whose key matches a remembered undo move would walk the
/// search straight back, so it is rejected unless it beats the best score
/// (aspiration). A size of zero disables the list.
///
/// # Example
///
/// ```
/// use talkforge_solver::{MoveKey, MoveTabuList};
///
/// let mut tabu = MoveTabuList::new(2);
/// tabu.push(MoveKey::Swap { low: 0, high: 1 });
/// tabu.push(MoveKey::Swap { low: 2, high: 3 });
/// tabu.push(MoveKey::Swap { low: 4, high: 5 });
///
/// assert!(!tabu.is_tabu(&MoveKey::Swap { low: 0, high: 1 }));
/// assert!(tabu.is_tabu(&MoveKey::Swap { low: 4, high: 5 }));
/// ```
#[derive(Debug, Clone)]
pub struct MoveTabuList {
    size: usize,
    keys: VecDeque<MoveKey>,
}

impl MoveTabuList {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            keys: VecDeque::with_capacity(size),
        }
    }

    pub fn push(&mut self, key: MoveKey) {
        if self.size == 0 {
            return;
        }
        if self.keys.len() == self.size {
            self.keys.pop_front();
        }
        self.keys.push_back(key);
    }

    pub fn is_tabu(&self, key: &MoveKey) -> bool {
        self.keys.contains(key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

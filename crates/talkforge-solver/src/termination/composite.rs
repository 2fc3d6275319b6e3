//! Composite termination.
//!
//! Uses macro-generated tuple implementations, so the combined termination
//! keeps every concrete type.

use std::fmt::Debug;

use super::Termination;
use crate::scope::SolverScope;

/// Combines multiple terminations with OR logic (any must terminate).
///
/// # Examples
///
/// ```
/// use talkforge_solver::termination::{OrTermination, StepCountTermination, TimeTermination};
///
/// // Terminate after 30 seconds OR 1000 steps
/// let termination = OrTermination::new((
///     TimeTermination::seconds(30),
///     StepCountTermination::new(1000),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for OR tuples.
macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool {
                $((self.0).$idx.is_terminated(solver_scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5);

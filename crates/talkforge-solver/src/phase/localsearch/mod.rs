//! Local search phase
//!
//! Improves the schedule one move per step. Each step samples a
//! neighborhood, evaluates every candidate with do, score, undo, lets the
//! acceptor and the tabu list filter them, and applies the best survivor.

mod acceptor;
mod forager;
mod phase;
mod tabu;

pub use acceptor::{Acceptor, AcceptorBuilder, HillClimbingAcceptor, SimulatedAnnealingAcceptor};
pub use forager::BestAcceptedForager;
pub use phase::LocalSearchPhase;
pub use tabu::MoveTabuList;

//! talkforge Solver Engine
//!
//! This crate provides the scheduling engine:
//! - `Solver`, which runs construction and local search and reports a
//!   `SolveResult`
//! - Phases (construction heuristic, local search)
//! - Change and swap moves with neighborhood sampling
//! - Termination conditions

pub mod heuristic;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod termination;

pub use heuristic::{ChangeMove, MoveKey, NeighborhoodSelector, ScheduleMove, SwapMove};
pub use phase::{
    construction::ConstructionHeuristicPhase,
    localsearch::{
        Acceptor, AcceptorBuilder, BestAcceptedForager, HillClimbingAcceptor, LocalSearchPhase,
        MoveTabuList, SimulatedAnnealingAcceptor,
    },
    Phase, SolverPhase,
};
pub use scope::{PhaseScope, SolverScope};
pub use solver::{
    SolveError, SolveResult, SolveStatus, Solver, SolverState, UnassignedReason, UnassignedTalk,
};
pub use stats::{PhaseStats, SolverStats};
pub use termination::{
    BestScoreTermination, ExternalTermination, OrTermination, SolverTermination,
    StepCountTermination, Termination, TimeTermination, UnimprovedStepCountTermination,
};

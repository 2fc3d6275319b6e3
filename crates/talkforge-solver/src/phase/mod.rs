//! Solver phases
//!
//! Phases are the main building blocks of solving:
//! - ConstructionHeuristicPhase: places every talk it can, one at a time
//! - LocalSearchPhase: improves the schedule with change and swap moves

pub mod construction;
pub mod localsearch;

use std::fmt::Debug;

use talkforge_config::{PhaseConfig, SolverConfig};

use crate::scope::SolverScope;

use construction::ConstructionHeuristicPhase;
use localsearch::LocalSearchPhase;

/// A phase of the solving process.
///
/// Phases are executed in sequence by the solver. Each phase modifies the
/// working schedule in the solver scope and updates the best schedule when
/// it improves.
pub trait Phase: Send + Debug {
    /// Executes this phase.
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>);

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}

/// The phases a configuration can list.
#[derive(Debug)]
pub enum SolverPhase {
    Construction(ConstructionHeuristicPhase),
    LocalSearch(LocalSearchPhase),
}

impl SolverPhase {
    /// Builds the configured phases in order. An empty phase list means a
    /// construction heuristic followed by local search, both with default
    /// settings.
    pub fn build_all(config: &SolverConfig) -> Vec<SolverPhase> {
        if config.phases.is_empty() {
            return vec![
                SolverPhase::Construction(ConstructionHeuristicPhase::from_config(
                    0,
                    &config.construction_heuristic(),
                )),
                SolverPhase::LocalSearch(LocalSearchPhase::from_config(1, &config.local_search())),
            ];
        }
        config
            .phases
            .iter()
            .enumerate()
            .map(|(phase_index, phase)| match phase {
                PhaseConfig::ConstructionHeuristic(c) => SolverPhase::Construction(
                    ConstructionHeuristicPhase::from_config(phase_index, c),
                ),
                PhaseConfig::LocalSearch(c) => {
                    SolverPhase::LocalSearch(LocalSearchPhase::from_config(phase_index, c))
                }
            })
            .collect()
    }
}

impl Phase for SolverPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) {
        match self {
            SolverPhase::Construction(phase) => phase.solve(solver_scope),
            SolverPhase::LocalSearch(phase) => phase.solve(solver_scope),
        }
    }

    fn phase_type_name(&self) -> &'static str {
        match self {
            SolverPhase::Construction(phase) => phase.phase_type_name(),
            SolverPhase::LocalSearch(phase) => phase.phase_type_name(),
        }
    }
}

//! Configuration system for talkforge.
//!
//! Load solver configuration from TOML or YAML to control termination,
//! phases, the acceptor and parallel runs without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use talkforge_config::{AcceptorConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!     run_count = 4
//!
//!     [termination]
//!     seconds_spent_limit = 10
//!     best_score_limit = "0hard/0soft"
//!
//!     [[phases]]
//!     type = "construction_heuristic"
//!
//!     [[phases]]
//!     type = "local_search"
//!     neighborhood_size = 32
//!     [phases.acceptor]
//!     type = "simulated_annealing"
//!     starting_temperature = 4.0
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Duration::from_secs(10));
//! assert_eq!(config.run_count, 4);
//! assert_eq!(config.local_search().neighborhood_size(), 32);
//! assert!(matches!(config.local_search().acceptor(), AcceptorConfig::SimulatedAnnealing(_)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use talkforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use talkforge_core::HardSoftScore;
use thiserror::Error;

/// Time budget used when no time limit is configured.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn default_run_count() -> usize {
    1
}

/// Main solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Number of independent runs solved in parallel.
    #[serde(default = "default_run_count")]
    pub run_count: usize,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Phase configurations.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            run_count: default_run_count(),
            termination: None,
            phases: Vec::new(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the total step limit.
    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.termination = Some(TerminationConfig {
            step_count_limit: Some(steps),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the number of parallel runs.
    pub fn with_run_count(mut self, run_count: usize) -> Self {
        self.run_count = run_count;
        self
    }

    /// Adds a phase configuration.
    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    /// Returns the overall time budget, `DEFAULT_TIME_LIMIT` if none is set.
    pub fn time_limit(&self) -> Duration {
        self.termination
            .as_ref()
            .and_then(|t| t.time_limit())
            .unwrap_or(DEFAULT_TIME_LIMIT)
    }

    /// Returns the target score that stops solving early, if configured.
    pub fn best_score_limit(&self) -> Result<Option<HardSoftScore>, ConfigError> {
        match &self.termination {
            Some(t) => t.best_score_limit(),
            None => Ok(None),
        }
    }

    /// The construction phase settings, defaults if no such phase is listed.
    pub fn construction_heuristic(&self) -> ConstructionHeuristicConfig {
        self.phases
            .iter()
            .find_map(|p| match p {
                PhaseConfig::ConstructionHeuristic(c) => Some(c.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// The local search settings, defaults if no such phase is listed.
    pub fn local_search(&self) -> LocalSearchConfig {
        self.phases
            .iter()
            .find_map(|p| match p {
                PhaseConfig::LocalSearch(c) => Some(c.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Checks value ranges and phase layout.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run_count == 0 {
            return Err(invalid("run_count must be at least 1"));
        }

        let mut seen_construction = false;
        let mut seen_local_search = false;
        for phase in &self.phases {
            match phase {
                PhaseConfig::ConstructionHeuristic(_) => {
                    if seen_construction {
                        return Err(invalid("only one construction_heuristic phase is supported"));
                    }
                    if seen_local_search {
                        return Err(invalid("construction_heuristic must precede local_search"));
                    }
                    seen_construction = true;
                }
                PhaseConfig::LocalSearch(ls) => {
                    if seen_local_search {
                        return Err(invalid("only one local_search phase is supported"));
                    }
                    ls.validate()?;
                    seen_local_search = true;
                }
            }
        }

        self.best_score_limit()?;
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Seeds from the OS when no random seed is given.
    #[default]
    NonReproducible,

    /// Uses seed 0 when no random seed is given.
    Reproducible,

    /// Reproducible, and verifies the incremental score at every phase end.
    FastAssert,

    /// Reproducible, and verifies the incremental score after every step.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_reproducible(self) -> bool {
        !matches!(self, EnvironmentMode::NonReproducible)
    }

    pub fn is_asserted(self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the above.
    pub millis_spent_limit: Option<u64>,

    /// Target best score to achieve (as string, e.g., "0hard/0soft").
    pub best_score_limit: Option<String>,

    /// Maximum number of steps.
    pub step_count_limit: Option<u64>,

    /// Maximum unimproved steps before terminating.
    pub unimproved_step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    ///
    /// The parts saturate instead of overflowing, so an absurdly large limit
    /// means "effectively unbounded".
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1_000)
            .saturating_add(self.minutes_spent_limit.unwrap_or(0).saturating_mul(60_000))
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    /// Parses the target score, if any.
    pub fn best_score_limit(&self) -> Result<Option<HardSoftScore>, ConfigError> {
        self.best_score_limit
            .as_deref()
            .map(|s| {
                s.parse::<HardSoftScore>()
                    .map_err(|e| invalid(format!("best_score_limit: {e}")))
            })
            .transpose()
    }
}

/// Phase configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    /// Construction heuristic phase.
    ConstructionHeuristic(ConstructionHeuristicConfig),

    /// Local search phase.
    LocalSearch(LocalSearchConfig),
}

/// Construction heuristic configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstructionHeuristicConfig {
    /// Order in which talks are placed.
    #[serde(default)]
    pub talk_order: TalkOrder,
}

/// Placement order of the construction heuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TalkOrder {
    /// By track name, then flow order, then talk id.
    #[default]
    TrackFlowId,

    /// As declared in the input.
    Declared,
}

/// Local search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Acceptor configuration.
    pub acceptor: Option<AcceptorConfig>,

    /// Size of the move tabu list.
    pub move_tabu_size: Option<usize>,

    /// Moves sampled and evaluated per step.
    pub neighborhood_size: Option<usize>,

    /// Steps per round before restarting from the best schedule.
    pub restart_step_count: Option<u64>,
}

impl LocalSearchConfig {
    pub const DEFAULT_MOVE_TABU_SIZE: usize = 16;
    pub const DEFAULT_NEIGHBORHOOD_SIZE: usize = 64;
    pub const DEFAULT_RESTART_STEP_COUNT: u64 = 5_000;

    pub fn acceptor(&self) -> AcceptorConfig {
        self.acceptor
            .clone()
            .unwrap_or(AcceptorConfig::SimulatedAnnealing(
                SimulatedAnnealingConfig::default(),
            ))
    }

    pub fn move_tabu_size(&self) -> usize {
        self.move_tabu_size.unwrap_or(Self::DEFAULT_MOVE_TABU_SIZE)
    }

    pub fn neighborhood_size(&self) -> usize {
        self.neighborhood_size
            .unwrap_or(Self::DEFAULT_NEIGHBORHOOD_SIZE)
    }

    pub fn restart_step_count(&self) -> u64 {
        self.restart_step_count
            .unwrap_or(Self::DEFAULT_RESTART_STEP_COUNT)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.neighborhood_size() == 0 {
            return Err(invalid("neighborhood_size must be at least 1"));
        }
        if self.restart_step_count() == 0 {
            return Err(invalid("restart_step_count must be at least 1"));
        }
        if let AcceptorConfig::SimulatedAnnealing(sa) = self.acceptor() {
            let decay = sa.decay_rate();
            if !(decay > 0.0 && decay <= 1.0) {
                return Err(invalid(format!("decay_rate {decay} must be in (0, 1]")));
            }
            if sa.starting_temperature() < 0.0 || sa.minimum_temperature() < 0.0 {
                return Err(invalid("temperatures must not be negative"));
            }
        }
        Ok(())
    }
}

/// Acceptor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Hill climbing (only accept non-worsening moves).
    HillClimbing,

    /// Simulated annealing acceptor.
    SimulatedAnnealing(SimulatedAnnealingConfig),
}

/// Simulated annealing configuration.
///
/// Temperatures are expressed in soft penalty units.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    /// Starting temperature.
    pub starting_temperature: Option<f64>,

    /// Multiplicative decay applied after every step.
    pub decay_rate: Option<f64>,

    /// Temperature floor.
    pub minimum_temperature: Option<f64>,

    /// Worsening steps allowed per run; hill climbing afterwards.
    pub worsening_move_limit: Option<u64>,
}

impl SimulatedAnnealingConfig {
    pub const DEFAULT_STARTING_TEMPERATURE: f64 = 2.0;
    pub const DEFAULT_DECAY_RATE: f64 = 0.9995;
    pub const DEFAULT_MINIMUM_TEMPERATURE: f64 = 0.01;
    pub const DEFAULT_WORSENING_MOVE_LIMIT: u64 = 10_000;

    pub fn starting_temperature(&self) -> f64 {
        self.starting_temperature
            .unwrap_or(Self::DEFAULT_STARTING_TEMPERATURE)
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate.unwrap_or(Self::DEFAULT_DECAY_RATE)
    }

    pub fn minimum_temperature(&self) -> f64 {
        self.minimum_temperature
            .unwrap_or(Self::DEFAULT_MINIMUM_TEMPERATURE)
    }

    pub fn worsening_move_limit(&self) -> u64 {
        self.worsening_move_limit
            .unwrap_or(Self::DEFAULT_WORSENING_MOVE_LIMIT)
    }
}

#[cfg(test)]
mod tests;

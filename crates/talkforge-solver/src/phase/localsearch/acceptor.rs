//! Acceptors for local search move acceptance.
//!
//! Acceptors determine whether a move should be accepted based on
//! comparing the resulting score with the previous step's score.

use std::fmt::Debug;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use talkforge_config::AcceptorConfig;
use talkforge_core::HardMediumSoftScore;

/// Trait for accepting or rejecting moves in local search.
pub trait Acceptor: Send + Debug {
    /// Returns true if a move resulting in `move_score` should be accepted,
    /// given the previous step's score.
    fn is_accepted(
        &self,
        last_step_score: &HardMediumSoftScore,
        move_score: &HardMediumSoftScore,
        rng: &mut ChaCha8Rng,
    ) -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: &HardMediumSoftScore) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}

    /// Called when a step ends, whether or not a move was applied.
    fn step_ended(&mut self, _step_score: &HardMediumSoftScore) {}
}

/// Hill climbing acceptor - accepts only non-worsening moves.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use talkforge_core::HardMediumSoftScore;
/// use talkforge_solver::{Acceptor, HillClimbingAcceptor};
///
/// let acceptor = HillClimbingAcceptor::new();
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
/// let last = HardMediumSoftScore::of(0, 0, -5);
/// assert!(acceptor.is_accepted(&last, &HardMediumSoftScore::of(0, 0, -5), &mut rng));
/// assert!(!acceptor.is_accepted(&last, &HardMediumSoftScore::of(0, 0, -6), &mut rng));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl Acceptor for HillClimbingAcceptor {
    fn is_accepted(
        &self,
        last_step_score: &HardMediumSoftScore,
        move_score: &HardMediumSoftScore,
        _rng: &mut ChaCha8Rng,
    ) -> bool {
        move_score >= last_step_score
    }
}

/// Simulated annealing acceptor - accepts worsening moves with a
/// temperature-based probability.
///
/// A move worse by `delta` (in soft units, higher levels weighted so they
/// dominate) is accepted with probability `exp(-delta / temperature)`.
/// The temperature decays geometrically after every step down to a floor
/// and is reset when a phase starts.
///
/// With a worsening-move limit, the acceptor counts the steps that actually
/// lowered the score. Once the limit is reached it behaves like hill
/// climbing. The count is kept across phase restarts, so it bounds a whole
/// run.
///
/// # Example
///
/// ```
/// use talkforge_solver::SimulatedAnnealingAcceptor;
///
/// let acceptor = SimulatedAnnealingAcceptor::new(2.0, 0.999, 0.01)
///     .with_worsening_move_limit(Some(100));
/// assert_eq!(acceptor.current_temperature(), 2.0);
/// assert_eq!(acceptor.worsening_moves_taken(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    decay_rate: f64,
    minimum_temperature: f64,
    worsening_move_limit: Option<u64>,
    worsening_moves_taken: u64,
    last_step_score: Option<HardMediumSoftScore>,
}

impl SimulatedAnnealingAcceptor {
    pub fn new(starting_temperature: f64, decay_rate: f64, minimum_temperature: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            decay_rate,
            minimum_temperature,
            worsening_move_limit: None,
            worsening_moves_taken: 0,
            last_step_score: None,
        }
    }

    /// Caps the number of worsening steps; `None` leaves it unbounded.
    pub fn with_worsening_move_limit(mut self, limit: Option<u64>) -> Self {
        self.worsening_move_limit = limit;
        self
    }

    pub fn current_temperature(&self) -> f64 {
        self.current_temperature
    }

    pub fn worsening_moves_taken(&self) -> u64 {
        self.worsening_moves_taken
    }

    fn budget_spent(&self) -> bool {
        self.worsening_move_limit
            .is_some_and(|limit| self.worsening_moves_taken >= limit)
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(2.0, 0.9995, 0.01)
    }
}

impl Acceptor for SimulatedAnnealingAcceptor {
    fn is_accepted(
        &self,
        last_step_score: &HardMediumSoftScore,
        move_score: &HardMediumSoftScore,
        rng: &mut ChaCha8Rng,
    ) -> bool {
        if move_score >= last_step_score {
            return true;
        }
        if self.current_temperature <= 0.0 || self.budget_spent() {
            return false;
        }
        let delta = last_step_score.to_scalar() - move_score.to_scalar();
        let acceptance_probability = (-delta / self.current_temperature).exp();
        rng.random::<f64>() < acceptance_probability
    }

    fn phase_started(&mut self, initial_score: &HardMediumSoftScore) {
        self.current_temperature = self.starting_temperature;
        self.last_step_score = Some(*initial_score);
    }

    fn step_ended(&mut self, step_score: &HardMediumSoftScore) {
        if self.last_step_score.is_some_and(|last| *step_score < last) {
            self.worsening_moves_taken += 1;
        }
        self.last_step_score = Some(*step_score);
        self.current_temperature =
            (self.current_temperature * self.decay_rate).max(self.minimum_temperature);
    }
}

/// Builds acceptors from configuration.
pub struct AcceptorBuilder;

impl AcceptorBuilder {
    pub fn build(config: &AcceptorConfig) -> Box<dyn Acceptor> {
        match config {
            AcceptorConfig::HillClimbing => Box::new(HillClimbingAcceptor::new()),
            AcceptorConfig::SimulatedAnnealing(sa) => Box::new(
                SimulatedAnnealingAcceptor::new(
                    sa.starting_temperature(),
                    sa.decay_rate(),
                    sa.minimum_temperature(),
                )
                .with_worsening_move_limit(Some(sa.worsening_move_limit())),
            ),
        }
    }
}

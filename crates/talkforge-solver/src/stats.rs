//! Run and phase statistics.
//!
//! Plain counters, frozen into the `SolveResult` of the winning run.

use std::time::{Duration, Instant};

fn per_second(count: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}

/// Statistics of one run, summed over its phases.
///
/// # Example
///
/// ```
/// use talkforge_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.start();
/// stats.record_step();
/// stats.record_move(true);
/// stats.record_move(false);
/// stats.finish();
///
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.moves_evaluated, 2);
/// assert_eq!(stats.acceptance_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverStats {
    started: Option<Instant>,
    finished: Option<Duration>,
    /// Steps, construction placements included.
    pub step_count: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
    /// Times the best schedule improved after the initial one.
    pub improvements: u64,
    /// Full and incremental score calculations by the director.
    pub score_calculations: u64,
}

impl SolverStats {
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
        self.finished = None;
    }

    /// Stops the clock; `elapsed` keeps returning the final duration.
    pub fn finish(&mut self) {
        self.finished = Some(self.elapsed());
    }

    pub fn elapsed(&self) -> Duration {
        match (self.finished, self.started) {
            (Some(elapsed), _) => elapsed,
            (None, Some(started)) => started.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }

    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        self.moves_accepted += u64::from(accepted);
    }

    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    pub fn record_improvement(&mut self) {
        self.improvements += 1;
    }

    pub fn record_score_calculations(&mut self, count: u64) {
        self.score_calculations += count;
    }

    pub fn moves_per_second(&self) -> f64 {
        per_second(self.moves_evaluated, self.elapsed())
    }

    /// Share of evaluated moves the acceptor took, 0 when none were
    /// evaluated.
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}

/// Statistics of a single phase, reported in its `phase_end` event.
#[derive(Debug)]
pub struct PhaseStats {
    pub phase_index: usize,
    pub phase_type: &'static str,
    started: Instant,
    pub step_count: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
}

impl PhaseStats {
    pub fn new(phase_index: usize, phase_type: &'static str) -> Self {
        Self {
            phase_index,
            phase_type,
            started: Instant::now(),
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        self.moves_accepted += u64::from(accepted);
    }

    /// Whole moves per second, as logged.
    pub fn moves_per_second(&self) -> u64 {
        per_second(self.moves_evaluated, self.elapsed()) as u64
    }
}

//! Cumulative step metrics for the simulator.
//!
//! [`StepMetrics`] counts what the propagator did to each particle and
//! how long stepping took, enabling telemetry and profiling.

use brume_propagator::StepOutcome;

/// Counters accumulated over every step of a simulator.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Simulator steps completed.
    pub steps: u64,
    /// Particle moves committed.
    pub moves: u64,
    /// Particle steps skipped because `D == 0`.
    pub immobile: u64,
    /// Diffusion moves refused by overlap.
    pub blocked: u64,
    /// Reactions committed.
    pub reactions: u64,
    /// Reactions that fired but found no room for their products.
    pub rejected: u64,
    /// Wall-clock time of the most recent step.
    pub last_step_us: u64,
    /// Wall-clock time of all steps.
    pub total_us: u64,
}

impl StepMetrics {
    /// Count one particle step.
    pub fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Moved => self.moves += 1,
            StepOutcome::Immobile => self.immobile += 1,
            StepOutcome::Blocked => self.blocked += 1,
            StepOutcome::Reacted => self.reactions += 1,
            StepOutcome::Rejected => self.rejected += 1,
        }
    }

    /// Particle steps counted so far.
    pub fn particle_steps(&self) -> u64 {
        self.moves + self.immobile + self.blocked + self.reactions + self.rejected
    }
}

//! Observers that record simulation state while a simulator runs.

use brume_core::Species;
use brume_space::ParticleSpace;

/// Something that samples the simulation during
/// [`BdSimulator::run`](crate::BdSimulator::run).
///
/// Scheduled observers report the time they next want to fire through
/// [`next_time`](Self::next_time); each firing must move that time
/// strictly forward. Observers returning `true` from
/// [`every_step`](Self::every_step) are fired after every simulator step
/// instead.
pub trait Observer {
    /// Called once at the start of every run, at simulation time `t`.
    fn initialize(&mut self, t: f64, space: &dyn ParticleSpace);

    /// Time of the next scheduled firing; `f64::INFINITY` for none.
    fn next_time(&self) -> f64;

    /// Sample the simulation at time `t`. Returning `false` retires the
    /// observer for the rest of the run.
    fn fire(&mut self, t: f64, space: &dyn ParticleSpace) -> bool;

    /// Discard recorded data and restart the schedule.
    fn reset(&mut self);

    /// True if the observer fires after every simulator step.
    fn every_step(&self) -> bool {
        false
    }
}

/// One sampled row: the time and one count per target species.
pub type CountRow = (f64, Vec<usize>);

fn count_targets(targets: &[Species], space: &dyn ParticleSpace) -> Vec<usize> {
    targets.iter().map(|sp| space.num_particles_of(sp)).collect()
}

/// Records species counts at `t0, t0 + interval, t0 + 2 interval, ...`
///
/// `t0` is the simulation time when the observer is first initialized.
#[derive(Clone, Debug)]
pub struct FixedIntervalNumberObserver {
    interval: f64,
    targets: Vec<Species>,
    t0: f64,
    count: u64,
    data: Vec<CountRow>,
}

impl FixedIntervalNumberObserver {
    /// Create an observer sampling `targets` every `interval`.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is not finite and positive.
    pub fn new<I>(interval: f64, targets: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Species>,
    {
        assert!(
            interval.is_finite() && interval > 0.0,
            "observer interval must be finite and positive, got {interval}"
        );
        Self {
            interval,
            targets: targets.into_iter().map(Into::into).collect(),
            t0: 0.0,
            count: 0,
            data: Vec::new(),
        }
    }

    /// Sampling interval.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Species being counted, in column order.
    pub fn targets(&self) -> &[Species] {
        &self.targets
    }

    /// Number of firings so far.
    pub fn num_steps(&self) -> u64 {
        self.count
    }

    /// Recorded rows.
    pub fn data(&self) -> &[CountRow] {
        &self.data
    }
}

impl Observer for FixedIntervalNumberObserver {
    fn initialize(&mut self, t: f64, _space: &dyn ParticleSpace) {
        if self.count == 0 {
            self.t0 = t;
        }
    }

    fn next_time(&self) -> f64 {
        self.t0 + self.count as f64 * self.interval
    }

    fn fire(&mut self, t: f64, space: &dyn ParticleSpace) -> bool {
        self.data.push((t, count_targets(&self.targets, space)));
        self.count += 1;
        true
    }

    fn reset(&mut self) {
        self.count = 0;
        self.data.clear();
    }
}

/// Records species counts at the start of a run and after every step.
#[derive(Clone, Debug)]
pub struct NumberObserver {
    targets: Vec<Species>,
    data: Vec<CountRow>,
}

impl NumberObserver {
    /// Create an observer counting `targets`.
    pub fn new<I>(targets: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Species>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            data: Vec::new(),
        }
    }

    /// Species being counted, in column order.
    pub fn targets(&self) -> &[Species] {
        &self.targets
    }

    /// Recorded rows.
    pub fn data(&self) -> &[CountRow] {
        &self.data
    }
}

impl Observer for NumberObserver {
    fn initialize(&mut self, t: f64, space: &dyn ParticleSpace) {
        // Resuming at the time of the last row would duplicate it.
        if self.data.last().is_some_and(|(last, _)| *last == t) {
            return;
        }
        self.data.push((t, count_targets(&self.targets, space)));
    }

    fn next_time(&self) -> f64 {
        f64::INFINITY
    }

    fn fire(&mut self, t: f64, space: &dyn ParticleSpace) -> bool {
        self.data.push((t, count_targets(&self.targets, space)));
        true
    }

    fn reset(&mut self) {
        self.data.clear();
    }

    fn every_step(&self) -> bool {
        true
    }
}

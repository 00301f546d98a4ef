//! The Brownian-dynamics simulator.
//!
//! [`BdSimulator`] is the user-facing API. Each [`step()`](BdSimulator::step)
//! builds a [`BdPropagator`] over every particle in the space, drives it
//! until its work list is empty, and advances time by `dt`.
//!
//! # Ownership model
//!
//! The simulator owns its space, model, and random source. A step borrows
//! all three for the propagator's lifetime and returns them before the
//! call completes, so state is only observable between steps.

use std::time::Instant;

use brume_core::{Particle, ParticleId, Real3, Species};
use brume_model::Model;
use brume_propagator::{BdPropagator, ChaChaSource, RandomSource, ReactionRecord};
use brume_queue::EventScheduler;
use brume_space::{ParticleSpace, ParticleSpaceVec};
use log::{info, warn};

use crate::config::{determine_dt, validate_dt, ConfigError, SimulatorConfig};
use crate::error::SimulationError;
use crate::metrics::StepMetrics;
use crate::observer::Observer;

/// Random placement attempts per particle in
/// [`add_molecules`](BdSimulator::add_molecules).
const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

// ── BdSimulator ────────────────────────────────────────────────────

/// Fixed-step Brownian-dynamics simulator in a periodic box.
///
/// # Example
///
/// ```
/// use brume_core::SpeciesInfo;
/// use brume_engine::{BdSimulator, SimulatorConfig};
/// use brume_model::{NetworkModel, ReactionRule};
///
/// let mut model = NetworkModel::new();
/// model.add_species_attribute("A", SpeciesInfo::new(0.005, 1.0)).unwrap();
/// model.add_reaction_rule(ReactionRule::unimolecular("A", Vec::<&str>::new(), 0.1).unwrap()).unwrap();
///
/// let config = SimulatorConfig { dt: Some(1e-4), seed: 1, ..Default::default() };
/// let mut sim = BdSimulator::new(config, model).unwrap();
/// sim.add_molecules("A", 10).unwrap();
/// sim.step_until(0.01).unwrap();
/// assert!(sim.t() <= 0.01);
/// ```
pub struct BdSimulator<M, R = ChaChaSource> {
    space: ParticleSpaceVec,
    model: M,
    rng: R,
    t: f64,
    dt: f64,
    max_retry_count: usize,
    num_steps: u64,
    last_reactions: Vec<ReactionRecord>,
    metrics: StepMetrics,
}

impl<M: Model> BdSimulator<M, ChaChaSource> {
    /// Create a simulator seeded from `config.seed`.
    pub fn new(config: SimulatorConfig, model: M) -> Result<Self, SimulationError> {
        let rng = ChaChaSource::new(config.seed);
        Self::with_random_source(config, model, rng)
    }
}

impl<M: Model, R: RandomSource> BdSimulator<M, R> {
    /// Create a simulator drawing from `rng`. `config.seed` is ignored.
    pub fn with_random_source(
        config: SimulatorConfig,
        model: M,
        rng: R,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let space = ParticleSpaceVec::new(config.edge_lengths)?;
        let dt = match config.dt {
            Some(dt) => dt,
            None => {
                let dt = determine_dt(&model, config.dt_factor)?;
                warn!("dt not set; using {dt} derived from species attributes");
                dt
            }
        };
        Ok(Self {
            space,
            model,
            rng,
            t: 0.0,
            dt,
            max_retry_count: config.max_retry_count,
            num_steps: 0,
            last_reactions: Vec::new(),
            metrics: StepMetrics::default(),
        })
    }

    /// Current simulation time.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Overwrite the simulation time.
    pub fn set_t(&mut self, t: f64) {
        self.t = t;
    }

    /// Step interval.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Replace the step interval.
    pub fn set_dt(&mut self, dt: f64) -> Result<(), ConfigError> {
        validate_dt(dt)?;
        self.dt = dt;
        Ok(())
    }

    /// Steps taken so far, including shortened final steps.
    pub fn num_steps(&self) -> u64 {
        self.num_steps
    }

    /// Reactions committed during the most recent step.
    pub fn last_reactions(&self) -> &[ReactionRecord] {
        &self.last_reactions
    }

    /// True if the most recent step committed any reaction.
    pub fn check_reaction(&self) -> bool {
        !self.last_reactions.is_empty()
    }

    /// Cumulative metrics.
    pub fn metrics(&self) -> &StepMetrics {
        &self.metrics
    }

    /// The particle space.
    pub fn space(&self) -> &ParticleSpaceVec {
        &self.space
    }

    /// The reaction model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Advance by one full step of `dt`.
    ///
    /// Fails with `SimulationError::Stalled` if `t + dt` is not greater
    /// than `t`.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        if self.t + self.dt <= self.t {
            return Err(SimulationError::Stalled {
                t: self.t,
                dt: self.dt,
            });
        }
        self.advance(self.dt)?;
        self.t += self.dt;
        Ok(())
    }

    /// Step towards `upto` without passing it.
    ///
    /// Takes a full step if one fits, otherwise a shortened step landing
    /// exactly on `upto`. Returns `true` while `upto` is still ahead.
    pub fn step_until(&mut self, upto: f64) -> Result<bool, SimulationError> {
        if upto <= self.t {
            return Ok(false);
        }
        if self.t + self.dt <= upto {
            self.step()?;
            return Ok(self.t < upto);
        }
        self.advance(upto - self.t)?;
        self.t = upto;
        Ok(false)
    }

    /// Run for `duration`, firing `observers` in time order.
    ///
    /// Stepping is shortened where needed so that every scheduled firing
    /// happens exactly at its requested time.
    pub fn run(
        &mut self,
        duration: f64,
        observers: &mut [&mut dyn Observer],
    ) -> Result<(), SimulationError> {
        let upto = self.t + duration;
        info!(
            "run from t = {} to t = {upto} with {} particles",
            self.t,
            self.space.num_particles()
        );

        let mut scheduler = EventScheduler::new();
        for (i, obs) in observers.iter_mut().enumerate() {
            obs.initialize(self.t, &self.space);
            let next = obs.next_time();
            if next.is_finite() {
                scheduler.add(next, i);
            }
        }

        loop {
            let target = scheduler.next_time().min(upto);
            while self.t < target {
                self.step_until(target)?;
                for obs in observers.iter_mut().filter(|o| o.every_step()) {
                    obs.fire(self.t, &self.space);
                }
            }

            while scheduler.next_time() <= self.t {
                let Some((_, _, i)) = scheduler.pop() else {
                    break;
                };
                let obs = &mut observers[i];
                if obs.fire(self.t, &self.space) {
                    let next = obs.next_time();
                    if next.is_finite() {
                        scheduler.add(next, i);
                    }
                } else {
                    warn!("observer {i} exhausted at t = {}", self.t);
                }
            }

            if self.t >= upto {
                break;
            }
        }

        info!(
            "run finished at t = {} after {} steps",
            self.t, self.num_steps
        );
        Ok(())
    }

    /// Place `n` particles of `species` at uniformly random free positions.
    ///
    /// Each particle gets a bounded number of placement attempts; if one
    /// cannot be placed the particles placed so far stay and
    /// `SimulationError::NoRoom` is returned.
    pub fn add_molecules(
        &mut self,
        species: impl Into<Species>,
        n: usize,
    ) -> Result<Vec<ParticleId>, SimulationError> {
        let species = species.into();
        let Some(info) = self.model.species_info(&species) else {
            return Err(SimulationError::UnknownSpecies { species });
        };
        let edges = self.space.edge_lengths();
        let mut placed = Vec::with_capacity(n);
        for _ in 0..n {
            let mut pid = None;
            for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                let pos = Real3::new(
                    self.rng.uniform(0.0, edges.x()),
                    self.rng.uniform(0.0, edges.y()),
                    self.rng.uniform(0.0, edges.z()),
                );
                pid = self.new_particle(Particle::with_info(species.clone(), pos, info));
                if pid.is_some() {
                    break;
                }
            }
            match pid {
                Some(pid) => placed.push(pid),
                None => {
                    return Err(SimulationError::NoRoom {
                        species,
                        placed: placed.len(),
                        requested: n,
                    })
                }
            }
        }
        Ok(placed)
    }

    /// Insert `particle` unless it overlaps an existing particle.
    pub fn new_particle(&mut self, particle: Particle) -> Option<ParticleId> {
        let pos = self.space.apply_boundary(particle.position());
        if !self
            .space
            .list_particles_within_radius(pos, particle.radius(), &[])
            .is_empty()
        {
            return None;
        }
        Some(self.space.new_particle(particle.moved_to(pos)))
    }

    /// Remove a particle. Returns `false` if absent.
    pub fn remove_particle(&mut self, pid: ParticleId) -> bool {
        self.space.remove_particle(pid)
    }

    /// Run one propagator sweep of length `dt`; time is advanced by the
    /// caller.
    fn advance(&mut self, dt: f64) -> Result<(), SimulationError> {
        let start = Instant::now();
        let mut propagator = BdPropagator::new(
            &mut self.space,
            &self.model,
            &mut self.rng,
            dt,
            self.max_retry_count,
        );
        while propagator.step()? {
            if let Some(outcome) = propagator.step_outcome() {
                self.metrics.record(outcome);
            }
        }
        self.last_reactions = propagator.into_reactions();

        self.num_steps += 1;
        let elapsed_us = start.elapsed().as_micros() as u64;
        self.metrics.steps += 1;
        self.metrics.last_step_us = elapsed_us;
        self.metrics.total_us += elapsed_us;
        Ok(())
    }
}

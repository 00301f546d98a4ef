//! The Brownian-dynamics propagation step.

use std::f64::consts::PI;

use brume_core::{Particle, ParticleId, PropagatorError, Species, SpeciesInfo};
use brume_model::{Model, ReactionRule};
use brume_space::{Neighbour, ParticleSpace};
use log::{debug, trace};
use smallvec::{smallvec, SmallVec};

use crate::functions3d::igbd_3d;
use crate::random::RandomSource;

/// Particles taking part in one reaction, on either side.
pub type ParticleList = SmallVec<[(ParticleId, Particle); 2]>;

/// What a single [`BdPropagator::step`] did to the particle it processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The particle diffused to a free position.
    Moved,
    /// No reaction fired and the particle cannot diffuse (`D == 0`).
    Immobile,
    /// The diffusion move was refused: the candidate position overlaps
    /// two or more particles, or overlaps one and no pair rule fired.
    Blocked,
    /// A reaction fired and its products were committed.
    Reacted,
    /// A reaction fired but its products could not be placed; the
    /// reactants are left unchanged.
    Rejected,
}

/// A committed reaction.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionRecord {
    /// The rule that fired.
    pub rule: ReactionRule,
    /// Reactants as they were when the rule fired.
    pub reactants: ParticleList,
    /// Products as they were placed.
    pub products: ParticleList,
}

/// Single-particle Brownian-dynamics stepper over a particle space.
///
/// Built over a snapshot of every particle id in the space, shuffled with
/// the random source. Each [`step`](Self::step) pops one id from the back
/// of that work list and processes it; ids of particles destroyed by a
/// reaction are purged from the list, and particles created by a reaction
/// are not added to it.
///
/// The propagator borrows the space and the random source mutably for its
/// whole lifetime.
pub struct BdPropagator<'a, S, M, R>
where
    S: ParticleSpace,
    M: Model,
    R: RandomSource,
{
    space: &'a mut S,
    model: &'a M,
    rng: &'a mut R,
    dt: f64,
    max_retry_count: usize,
    queue: Vec<ParticleId>,
    reactions: Vec<ReactionRecord>,
    last_outcome: Option<StepOutcome>,
}

impl<'a, S, M, R> BdPropagator<'a, S, M, R>
where
    S: ParticleSpace,
    M: Model,
    R: RandomSource,
{
    /// Build a propagator over every particle currently in `space`.
    ///
    /// `dt` must be positive. `max_retry_count` bounds the placement
    /// attempts for two-product dissociations.
    pub fn new(
        space: &'a mut S,
        model: &'a M,
        rng: &'a mut R,
        dt: f64,
        max_retry_count: usize,
    ) -> Self {
        debug_assert!(dt > 0.0, "dt must be positive, got {dt}");
        let mut queue = space.particle_ids();
        rng.shuffle(&mut queue);
        Self {
            space,
            model,
            rng,
            dt,
            max_retry_count,
            queue,
            reactions: Vec::new(),
            last_outcome: None,
        }
    }

    /// Step interval.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of particles still waiting for their step.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Outcome of the most recent [`step`](Self::step), `None` before the
    /// first step or once the work list ran dry.
    pub fn step_outcome(&self) -> Option<StepOutcome> {
        self.last_outcome
    }

    /// Reactions committed so far, in firing order.
    pub fn reactions(&self) -> &[ReactionRecord] {
        &self.reactions
    }

    /// Consume the propagator, returning the committed reactions.
    pub fn into_reactions(self) -> Vec<ReactionRecord> {
        self.reactions
    }

    /// Process the next particle on the work list.
    ///
    /// Returns `Ok(false)` once the work list is empty.
    pub fn step(&mut self) -> Result<bool, PropagatorError> {
        let Some(pid) = self.queue.pop() else {
            self.last_outcome = None;
            return Ok(false);
        };
        let particle = self
            .space
            .get_particle(pid)
            .cloned()
            .ok_or(PropagatorError::ParticleNotFound { pid })?;

        let outcome = match self.attempt_unimolecular(pid, &particle)? {
            Some(outcome) => outcome,
            None => self.diffuse(pid, particle)?,
        };
        trace!("{pid}: {outcome:?}");
        self.last_outcome = Some(outcome);
        Ok(true)
    }

    fn diffuse(
        &mut self,
        pid: ParticleId,
        particle: Particle,
    ) -> Result<StepOutcome, PropagatorError> {
        if particle.d() == 0.0 {
            return Ok(StepOutcome::Immobile);
        }
        let displacement = self.rng.draw_displacement(particle.d(), self.dt);
        let newpos = self.space.apply_boundary(particle.position() + displacement);
        let moved = particle.moved_to(newpos);
        let overlapped = self
            .space
            .list_particles_within_radius(newpos, moved.radius(), &[pid]);

        match overlapped.as_slice() {
            [] => {
                self.space.update_particle(pid, moved);
                Ok(StepOutcome::Moved)
            }
            [neighbour] => self.attempt_bimolecular(pid, &moved, neighbour),
            _ => Ok(StepOutcome::Blocked),
        }
    }

    fn attempt_unimolecular(
        &mut self,
        pid: ParticleId,
        particle: &Particle,
    ) -> Result<Option<StepOutcome>, PropagatorError> {
        let model = self.model;
        let rules = model.query_reaction_rules(particle.species());
        if rules.is_empty() {
            return Ok(None);
        }

        let rnd = self.rng.uniform(0.0, 1.0);
        let mut prob = 0.0;
        for rule in rules {
            prob += rule.k() * self.dt;
            if prob > rnd {
                return self.fire_unimolecular(pid, particle, rule).map(Some);
            }
        }
        Ok(None)
    }

    fn fire_unimolecular(
        &mut self,
        pid: ParticleId,
        particle: &Particle,
        rule: &ReactionRule,
    ) -> Result<StepOutcome, PropagatorError> {
        let reactants: ParticleList = smallvec![(pid, particle.clone())];
        match rule.products() {
            [] => {
                self.space.remove_particle(pid);
                self.purge(pid);
                self.record(rule, reactants, ParticleList::new());
                Ok(StepOutcome::Reacted)
            }
            [sp] => {
                let info = self.species_info(sp)?;
                let product = Particle::with_info(sp.clone(), particle.position(), info);
                if self.overlaps(&product, &[pid]) {
                    debug!("{pid}: {rule} rejected, no room for product");
                    return Ok(StepOutcome::Rejected);
                }
                self.space.update_particle(pid, product.clone());
                self.record(rule, reactants, smallvec![(pid, product)]);
                Ok(StepOutcome::Reacted)
            }
            [sp1, sp2] => {
                let info1 = self.species_info(sp1)?;
                let info2 = self.species_info(sp2)?;
                let r12 = info1.radius + info2.radius;
                let d12 = info1.d + info2.d;
                let (w1, w2) = if d12 > 0.0 {
                    (info1.d / d12, info2.d / d12)
                } else {
                    (0.5, 0.5)
                };

                for _ in 0..self.max_retry_count {
                    let ipv = self.rng.draw_ipv(r12, self.dt, d12);
                    let pos1 = self.space.apply_boundary(particle.position() + ipv * w1);
                    let pos2 = self.space.apply_boundary(particle.position() - ipv * w2);
                    let product1 = Particle::with_info(sp1.clone(), pos1, info1);
                    let product2 = Particle::with_info(sp2.clone(), pos2, info2);
                    if self.overlaps(&product1, &[pid]) || self.overlaps(&product2, &[pid]) {
                        continue;
                    }

                    self.space.update_particle(pid, product1.clone());
                    let pid2 = self.space.new_particle(product2.clone());
                    let products = smallvec![(pid, product1), (pid2, product2)];
                    self.record(rule, reactants, products);
                    return Ok(StepOutcome::Reacted);
                }
                debug!(
                    "{pid}: {rule} rejected after {} placement attempts",
                    self.max_retry_count
                );
                Ok(StepOutcome::Rejected)
            }
            products => Err(PropagatorError::UnsupportedProductCount {
                reactants: 1,
                products: products.len(),
            }),
        }
    }

    fn attempt_bimolecular(
        &mut self,
        pid: ParticleId,
        moved: &Particle,
        neighbour: &Neighbour,
    ) -> Result<StepOutcome, PropagatorError> {
        let model = self.model;
        let other = &neighbour.particle;
        let rules = model.query_reaction_rules_pair(moved.species(), other.species());
        if rules.is_empty() {
            return Ok(StepOutcome::Blocked);
        }

        let r12 = moved.radius() + other.radius();
        let normalisation = 4.0
            * PI
            * (igbd_3d(r12, self.dt, moved.d()) + igbd_3d(r12, self.dt, other.d()));
        let rnd = self.rng.uniform(0.0, 1.0);
        let mut prob = 0.0;
        for rule in rules {
            prob += rule.k() * self.dt / normalisation;
            if prob >= 1.0 {
                return Err(PropagatorError::ProbabilityOverflow {
                    probability: prob,
                    dt: self.dt,
                });
            }
            if prob > rnd {
                return self.fire_bimolecular(pid, moved, neighbour, rule);
            }
        }
        Ok(StepOutcome::Blocked)
    }

    fn fire_bimolecular(
        &mut self,
        pid1: ParticleId,
        p1: &Particle,
        neighbour: &Neighbour,
        rule: &ReactionRule,
    ) -> Result<StepOutcome, PropagatorError> {
        let pid2 = neighbour.pid;
        let p2 = &neighbour.particle;
        let reactants: ParticleList = smallvec![(pid1, p1.clone()), (pid2, p2.clone())];
        match rule.products() {
            [] => {
                self.space.remove_particle(pid1);
                self.space.remove_particle(pid2);
                self.purge(pid1);
                self.purge(pid2);
                self.record(rule, reactants, ParticleList::new());
                Ok(StepOutcome::Reacted)
            }
            [sp] => {
                let info = self.species_info(sp)?;
                let (d1, d2) = (p1.d(), p2.d());
                let image2 = self.space.periodic_transpose(p2.position(), p1.position());
                let centre = if d1 + d2 > 0.0 {
                    (p1.position() * d2 + image2 * d1) / (d1 + d2)
                } else {
                    (p1.position() + image2) * 0.5
                };
                let centre = self.space.apply_boundary(centre);
                let product = Particle::with_info(sp.clone(), centre, info);
                if self.overlaps(&product, &[pid1, pid2]) {
                    debug!("{pid1} + {pid2}: {rule} rejected, no room for product");
                    return Ok(StepOutcome::Rejected);
                }

                self.space.update_particle(pid1, product.clone());
                self.space.remove_particle(pid2);
                self.purge(pid2);
                self.record(rule, reactants, smallvec![(pid1, product)]);
                Ok(StepOutcome::Reacted)
            }
            products => Err(PropagatorError::UnsupportedProductCount {
                reactants: 2,
                products: products.len(),
            }),
        }
    }

    fn species_info(&self, species: &Species) -> Result<SpeciesInfo, PropagatorError> {
        self.model
            .species_info(species)
            .ok_or_else(|| PropagatorError::UnknownSpecies {
                species: species.clone(),
            })
    }

    fn overlaps(&self, particle: &Particle, ignore: &[ParticleId]) -> bool {
        !self
            .space
            .list_particles_within_radius(particle.position(), particle.radius(), ignore)
            .is_empty()
    }

    fn purge(&mut self, pid: ParticleId) {
        self.queue.retain(|&queued| queued != pid);
    }

    fn record(&mut self, rule: &ReactionRule, reactants: ParticleList, products: ParticleList) {
        debug!("fired {rule}");
        self.reactions.push(ReactionRecord {
            rule: rule.clone(),
            reactants,
            products,
        });
    }
}

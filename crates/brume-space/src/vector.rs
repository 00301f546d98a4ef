//! Periodic cuboid particle container with brute-force radius queries.

use brume_core::{Particle, ParticleId, ParticleIdGenerator, Real3};
use indexmap::IndexMap;

use crate::error::SpaceError;
use crate::space::{Neighbour, ParticleSpace};

/// Particles in a periodic cuboid, stored in insertion order.
///
/// Radius queries scan every particle under the minimum-image convention,
/// which is adequate for the populations a Brownian-dynamics step touches.
/// Removal swaps the last particle into the vacated slot, so iteration
/// order is deterministic but not strictly insertion order after removals.
///
/// # Examples
///
/// ```
/// use brume_core::{Particle, Real3, Species};
/// use brume_space::{ParticleSpace, ParticleSpaceVec};
///
/// let mut space = ParticleSpaceVec::new(Real3::splat(1.0)).unwrap();
/// let a = space.new_particle(Particle::new(Species::new("A"), Real3::splat(0.05), 0.01, 1.0));
/// space.new_particle(Particle::new(Species::new("A"), Real3::splat(0.95), 0.01, 1.0));
///
/// // The second particle is a periodic neighbour of the first.
/// let near = space.list_particles_within_radius(Real3::splat(0.05), 0.2, &[a]);
/// assert_eq!(near.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ParticleSpaceVec {
    edge_lengths: Real3,
    particles: IndexMap<ParticleId, Particle>,
    pidgen: ParticleIdGenerator,
}

impl ParticleSpaceVec {
    /// Create an empty space with the given box edge lengths.
    ///
    /// Returns `Err(SpaceError::InvalidEdgeLengths)` unless every edge is
    /// finite and strictly positive.
    pub fn new(edge_lengths: Real3) -> Result<Self, SpaceError> {
        if !edge_lengths.0.iter().all(|l| l.is_finite() && *l > 0.0) {
            return Err(SpaceError::InvalidEdgeLengths {
                reason: format!("{edge_lengths} must be finite and > 0 on every axis"),
            });
        }
        Ok(Self {
            edge_lengths,
            particles: IndexMap::new(),
            pidgen: ParticleIdGenerator::new(),
        })
    }

    /// Box volume.
    pub fn volume(&self) -> f64 {
        self.edge_lengths.x() * self.edge_lengths.y() * self.edge_lengths.z()
    }

    /// Iterate over stored particles without cloning.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> + '_ {
        self.particles.iter().map(|(pid, p)| (*pid, p))
    }

    /// Remove every particle. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl ParticleSpace for ParticleSpaceVec {
    fn edge_lengths(&self) -> Real3 {
        self.edge_lengths
    }

    fn num_particles(&self) -> usize {
        self.particles.len()
    }

    fn get_particle(&self, pid: ParticleId) -> Option<&Particle> {
        self.particles.get(&pid)
    }

    fn particle_ids(&self) -> Vec<ParticleId> {
        self.particles.keys().copied().collect()
    }

    fn list_particles(&self) -> Vec<(ParticleId, Particle)> {
        self.particles
            .iter()
            .map(|(pid, p)| (*pid, p.clone()))
            .collect()
    }

    fn new_particle(&mut self, particle: Particle) -> ParticleId {
        let pid = self.pidgen.next_id();
        self.particles.insert(pid, particle);
        pid
    }

    fn update_particle(&mut self, pid: ParticleId, particle: Particle) -> bool {
        debug_assert!(
            pid.0 <= self.pidgen.issued(),
            "{pid} was not issued by this space"
        );
        self.particles.insert(pid, particle).is_none()
    }

    fn remove_particle(&mut self, pid: ParticleId) -> bool {
        self.particles.swap_remove(&pid).is_some()
    }

    fn list_particles_within_radius(
        &self,
        pos: Real3,
        radius: f64,
        ignore: &[ParticleId],
    ) -> Vec<Neighbour> {
        let mut found: Vec<Neighbour> = self
            .particles
            .iter()
            .filter(|(pid, _)| !ignore.contains(pid))
            .filter_map(|(pid, p)| {
                let distance = self.distance(pos, p.position()) - p.radius();
                (distance <= radius).then(|| Neighbour {
                    pid: *pid,
                    particle: p.clone(),
                    distance,
                })
            })
            .collect();
        found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        found
    }
}

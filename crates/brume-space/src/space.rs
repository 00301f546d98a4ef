//! The core `ParticleSpace` trait.

use brume_core::{Particle, ParticleId, Real3, Species};

/// One result of a radius query.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighbour {
    /// Id of the overlapping particle.
    pub pid: ParticleId,
    /// The overlapping particle.
    pub particle: Particle,
    /// Distance from the query centre to the particle's surface
    /// (centre distance minus the particle's radius).
    pub distance: f64,
}

/// Authoritative store of live particles in a periodic cuboid.
///
/// The propagator reads, moves, creates, and removes particles only
/// through this trait. Implementations own particle-id issuance; the
/// boundary arithmetic has default implementations in terms of
/// [`edge_lengths`](Self::edge_lengths).
///
/// The space does not enforce non-overlap: callers check with
/// [`list_particles_within_radius`](Self::list_particles_within_radius)
/// before committing a placement.
pub trait ParticleSpace {
    /// Edge lengths of the periodic box.
    fn edge_lengths(&self) -> Real3;

    /// Number of stored particles.
    fn num_particles(&self) -> usize;

    /// The particle stored under `pid`.
    fn get_particle(&self, pid: ParticleId) -> Option<&Particle>;

    /// Ids of all stored particles in the backend's deterministic order.
    fn particle_ids(&self) -> Vec<ParticleId>;

    /// All stored particles in the backend's deterministic order.
    fn list_particles(&self) -> Vec<(ParticleId, Particle)>;

    /// Store a new particle under a freshly issued id.
    fn new_particle(&mut self, particle: Particle) -> ParticleId;

    /// Replace (or insert) the particle stored under `pid`.
    ///
    /// Returns `true` if `pid` was not stored before. `pid` must have been
    /// issued by this space.
    fn update_particle(&mut self, pid: ParticleId, particle: Particle) -> bool;

    /// Remove the particle stored under `pid`. Returns `false` if absent.
    fn remove_particle(&mut self, pid: ParticleId) -> bool;

    /// Every particle whose surface lies within `radius` of `pos`
    /// (touching counts), except those in `ignore`, nearest first.
    fn list_particles_within_radius(
        &self,
        pos: Real3,
        radius: f64,
        ignore: &[ParticleId],
    ) -> Vec<Neighbour>;

    /// True if `pid` is stored.
    fn has_particle(&self, pid: ParticleId) -> bool {
        self.get_particle(pid).is_some()
    }

    /// Number of stored particles of `species`.
    fn num_particles_of(&self, species: &Species) -> usize {
        self.list_particles()
            .iter()
            .filter(|(_, p)| p.species() == species)
            .count()
    }

    /// All stored particles of `species`.
    fn list_particles_of(&self, species: &Species) -> Vec<(ParticleId, Particle)> {
        self.list_particles()
            .into_iter()
            .filter(|(_, p)| p.species() == species)
            .collect()
    }

    /// Wrap `pos` into the primary box `[0, L)` on every axis.
    fn apply_boundary(&self, pos: Real3) -> Real3 {
        pos.zip_with(self.edge_lengths(), |x, l| {
            let wrapped = x - l * (x / l).floor();
            // Rounding can land exactly on `l` for tiny negative `x`.
            if wrapped >= l {
                0.0
            } else {
                wrapped
            }
        })
    }

    /// The periodic image of `pos` nearest to `reference`.
    fn periodic_transpose(&self, pos: Real3, reference: Real3) -> Real3 {
        let edges = self.edge_lengths();
        let mut out = pos;
        for axis in 0..3 {
            let l = edges[axis];
            out.0[axis] = pos[axis] - l * ((pos[axis] - reference[axis]) / l).round();
        }
        out
    }

    /// Minimum-image distance between two positions.
    fn distance(&self, a: Real3, b: Real3) -> f64 {
        (self.periodic_transpose(a, b) - b).length()
    }
}

//! The [`Particle`] record stored in a particle space.

use crate::position::Real3;
use crate::species::{Species, SpeciesInfo};

/// One simulated chemical entity.
///
/// A particle is a plain value: the space stores it keyed by a
/// [`ParticleId`](crate::ParticleId), and updates replace the whole record.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    species: Species,
    position: Real3,
    radius: f64,
    d: f64,
}

impl Particle {
    /// Create a particle.
    pub fn new(species: Species, position: Real3, radius: f64, d: f64) -> Self {
        Self {
            species,
            position,
            radius,
            d,
        }
    }

    /// Create a particle whose radius and diffusion coefficient come from
    /// the species attributes.
    pub fn with_info(species: Species, position: Real3, info: SpeciesInfo) -> Self {
        Self::new(species, position, info.radius, info.d)
    }

    /// The species of this particle.
    pub fn species(&self) -> &Species {
        &self.species
    }

    /// Current position.
    pub fn position(&self) -> Real3 {
        self.position
    }

    /// Hard-sphere radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Diffusion coefficient. Zero marks an immobile particle.
    pub fn d(&self) -> f64 {
        self.d
    }

    /// A copy of this particle moved to `position`.
    pub fn moved_to(&self, position: Real3) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moved_to_keeps_attributes() {
        let p = Particle::new(Species::new("A"), Real3::ZERO, 0.5, 1.0);
        let q = p.moved_to(Real3::splat(1.0));
        assert_eq!(q.species(), p.species());
        assert_eq!(q.radius(), 0.5);
        assert_eq!(q.d(), 1.0);
        assert_eq!(q.position(), Real3::splat(1.0));
    }
}

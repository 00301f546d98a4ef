//! Ready-made models and spaces for tests and benchmarks.

use brume_core::{Particle, ParticleId, Real3, Species, SpeciesInfo};
use brume_model::{NetworkModel, ReactionRule};
use brume_space::{ParticleSpace, ParticleSpaceVec};

/// Radius shared by the fixture species.
pub const RADIUS: f64 = 0.005;

/// Diffusion coefficient of the mobile fixture species.
pub const D: f64 = 1.0;

/// A cube of edge `l`.
pub fn cube_space(l: f64) -> ParticleSpaceVec {
    ParticleSpaceVec::new(Real3::splat(l)).expect("fixture edge lengths are valid")
}

/// Species `A`, `B`, `C` (mobile) and `W` (immobile), no rules.
pub fn abc_model() -> NetworkModel {
    let mut m = NetworkModel::new();
    for name in ["A", "B", "C"] {
        m.add_species_attribute(name, SpeciesInfo::new(RADIUS, D))
            .expect("fixture attributes are valid");
    }
    m.add_species_attribute("W", SpeciesInfo::new(RADIUS, 0.0))
        .expect("fixture attributes are valid");
    m
}

/// [`abc_model`] plus `A + B > C` at rate `kf` and `C > A + B` at rate `kb`.
pub fn binding_model(kf: f64, kb: f64) -> NetworkModel {
    let mut m = abc_model();
    m.add_reaction_rule(ReactionRule::bimolecular("A", "B", ["C"], kf).expect("valid rule"))
        .expect("fresh rule");
    m.add_reaction_rule(ReactionRule::unimolecular("C", ["A", "B"], kb).expect("valid rule"))
        .expect("fresh rule");
    m
}

/// Place a particle of a fixture species at `pos`.
pub fn place(space: &mut ParticleSpaceVec, species: &str, pos: Real3) -> ParticleId {
    let d = if species == "W" { 0.0 } else { D };
    space.new_particle(Particle::new(Species::new(species), pos, RADIUS, d))
}

/// `n` particles of `species` on a simple cubic lattice filling `space`.
///
/// Particles touch only if the lattice spacing falls below `2 * RADIUS`.
pub fn fill_lattice(space: &mut ParticleSpaceVec, species: &str, n: usize) -> Vec<ParticleId> {
    let per_axis = (n as f64).cbrt().ceil().max(1.0) as usize;
    let edges = space.edge_lengths();
    let step = edges * (1.0 / per_axis as f64);
    let mut ids = Vec::with_capacity(n);
    'fill: for i in 0..per_axis {
        for j in 0..per_axis {
            for k in 0..per_axis {
                if ids.len() == n {
                    break 'fill;
                }
                let pos = Real3::new(
                    (i as f64 + 0.5) * step.x(),
                    (j as f64 + 0.5) * step.y(),
                    (k as f64 + 0.5) * step.z(),
                );
                ids.push(place(space, species, pos));
            }
        }
    }
    ids
}

//! Benchmark profiles and utilities for the Brume particle simulator.
//!
//! Provides pre-built simulator setups for benchmarking:
//!
//! - [`binding_profile`]: `A + B <-> C` in a 0.2 box with 200 particles
//! - [`dilute_profile`]: the same network with 2000 particles in a 1.0 box

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use brume_core::{Real3, SpeciesInfo};
use brume_engine::{BdSimulator, SimulationError, SimulatorConfig};
use brume_model::{ModelError, NetworkModel, ReactionRule};

/// Radius of every profile species.
pub const RADIUS: f64 = 0.005;

/// `A + B <-> C` with equal radii and `D = 1`.
pub fn binding_network(kf: f64, kb: f64) -> Result<NetworkModel, ModelError> {
    let mut model = NetworkModel::new();
    for name in ["A", "B", "C"] {
        model.add_species_attribute(name, SpeciesInfo::new(RADIUS, 1.0))?;
    }
    model.add_reaction_rule(ReactionRule::bimolecular("A", "B", ["C"], kf)?)?;
    model.add_reaction_rule(ReactionRule::unimolecular("C", ["A", "B"], kb)?)?;
    Ok(model)
}

fn profile(
    edge: f64,
    per_species: usize,
    seed: u64,
) -> Result<BdSimulator<NetworkModel>, SimulationError> {
    let model = binding_network(0.01, 1.0)?;
    let config = SimulatorConfig {
        edge_lengths: Real3::splat(edge),
        dt: Some(1e-6),
        max_retry_count: 10,
        seed,
        ..Default::default()
    };
    let mut sim = BdSimulator::new(config, model)?;
    sim.add_molecules("A", per_species)?;
    sim.add_molecules("B", per_species)?;
    Ok(sim)
}

/// Build a crowded benchmark profile: 100 `A` and 100 `B` in a 0.2 box.
pub fn binding_profile(seed: u64) -> Result<BdSimulator<NetworkModel>, SimulationError> {
    profile(0.2, 100, seed)
}

/// Build a dilute benchmark profile: 1000 `A` and 1000 `B` in a unit box.
pub fn dilute_profile(seed: u64) -> Result<BdSimulator<NetworkModel>, SimulationError> {
    profile(1.0, 1000, seed)
}

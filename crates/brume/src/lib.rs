//! Brume: a Brownian-dynamics reaction-diffusion simulator.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Brume sub-crates. For most users, adding `brume` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use brume::prelude::*;
//!
//! // A + B <-> C with small, diffusing particles.
//! let mut model = NetworkModel::new();
//! for name in ["A", "B", "C"] {
//!     model.add_species_attribute(name, SpeciesInfo::new(0.005, 1.0)).unwrap();
//! }
//! model.add_reaction_rule(ReactionRule::bimolecular("A", "B", ["C"], 0.01).unwrap()).unwrap();
//! model.add_reaction_rule(ReactionRule::unimolecular("C", ["A", "B"], 0.5).unwrap()).unwrap();
//!
//! let config = SimulatorConfig { dt: Some(1e-5), seed: 42, ..Default::default() };
//! let mut sim = BdSimulator::new(config, model).unwrap();
//! sim.add_molecules("A", 20).unwrap();
//! sim.add_molecules("B", 20).unwrap();
//!
//! let mut obs = FixedIntervalNumberObserver::new(2.5e-4, ["A", "B", "C"]);
//! sim.run(1e-3, &mut [&mut obs]).unwrap();
//! assert_eq!(obs.data().len(), 5);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `brume-core` | IDs, positions, species, particles, propagator errors |
//! | [`queue`] | `brume-queue` | Indexed priority queue and event scheduler |
//! | [`space`] | `brume-space` | Particle space trait and periodic container |
//! | [`model`] | `brume-model` | Reaction rules and reaction networks |
//! | [`propagator`] | `brume-propagator` | Brownian-dynamics step and random sources |
//! | [`engine`] | `brume-engine` | Simulator loop, configuration, observers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types (`brume-core`).
///
/// Contains [`types::ParticleId`], [`types::Real3`], [`types::Species`],
/// [`types::Particle`], and [`types::PropagatorError`].
pub use brume_core as types;

/// Indexed priority queue and event scheduler (`brume-queue`).
///
/// [`queue::DynamicPriorityQueue`] supports O(log n) update and removal of
/// arbitrary items through stable serials; [`queue::EventScheduler`]
/// orders timed events on top of it.
pub use brume_queue as queue;

/// Particle storage (`brume-space`).
///
/// Provides the [`space::ParticleSpace`] trait and the
/// [`space::ParticleSpaceVec`] periodic backend.
pub use brume_space as space;

/// Reaction models (`brume-model`).
pub use brume_model as model;

/// Brownian-dynamics propagation (`brume-propagator`).
///
/// [`propagator::BdPropagator`] advances single particles;
/// [`propagator::functions3d`] holds the pair Green's-function integrals.
pub use brume_propagator as propagator;

/// Simulation loop (`brume-engine`).
pub use brume_engine as engine;

/// Common imports for typical Brume usage.
///
/// ```rust
/// use brume::prelude::*;
/// ```
///
/// This imports the most frequently used types: the simulator and its
/// configuration, observers, model building blocks, and core value types.
pub mod prelude {
    // Core types
    pub use brume_core::{Particle, ParticleId, PropagatorError, Real3, Species, SpeciesInfo};

    // Space
    pub use brume_space::{ParticleSpace, ParticleSpaceVec};

    // Model
    pub use brume_model::{Model, NetworkModel, ReactionRule};

    // Propagator
    pub use brume_propagator::{BdPropagator, ChaChaSource, RandomSource, StepOutcome};

    // Engine
    pub use brume_engine::{
        BdSimulator, FixedIntervalNumberObserver, NumberObserver, Observer, SimulationError,
        SimulatorConfig, StepMetrics,
    };
}

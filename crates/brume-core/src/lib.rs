//! Core types for the Brume particle simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental value types used throughout the Brume workspace:
//! identifiers, 3-D positions, species, particles, and the error enum
//! shared by the propagator and the simulator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod particle;
pub mod position;
pub mod species;

pub use error::PropagatorError;
pub use id::{ParticleId, ParticleIdGenerator};
pub use particle::Particle;
pub use position::Real3;
pub use species::{Species, SpeciesInfo};

//! Particle storage for Brume simulations.
//!
//! This crate defines the [`ParticleSpace`] trait, the authoritative store
//! of live particles through which the propagator reads, moves, creates,
//! and removes particles, along with the [`ParticleSpaceVec`] backend.
//!
//! # Backends
//!
//! - [`ParticleSpaceVec`]: periodic cuboid, insertion-ordered particle map,
//!   brute-force radius queries under the minimum-image convention

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod space;
pub mod vector;

#[cfg(test)]
pub(crate) mod compliance;

pub use error::SpaceError;
pub use space::{Neighbour, ParticleSpace};
pub use vector::ParticleSpaceVec;

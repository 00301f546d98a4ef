//! Brownian-dynamics propagation for Brume simulations.
//!
//! [`BdPropagator`] advances one particle per invocation: it attempts a
//! first-order reaction, otherwise displaces the particle by a Gaussian
//! random walk and resolves contact with a neighbour through a
//! second-order reaction attempt.
//!
//! Randomness enters only through the [`RandomSource`] trait.
//! [`ChaChaSource`] is the seeded production implementation; the
//! [`functions3d`] module holds the closed-form 3-D integrals used to
//! convert rate constants into per-step probabilities and to draw
//! product separations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod functions3d;
pub mod propagator;
pub mod random;

pub use propagator::{BdPropagator, ReactionRecord, StepOutcome};
pub use random::{ChaChaSource, RandomSource};

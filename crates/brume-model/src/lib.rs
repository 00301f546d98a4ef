//! Chemical reaction models for Brume simulations.
//!
//! A model answers three questions for the propagator: the radius and
//! diffusion coefficient of a species, the first-order rules a species
//! undergoes, and the second-order rules an unordered pair of species
//! undergoes. The [`Model`] trait carries that contract;
//! [`NetworkModel`] is an explicit reaction network.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod network;
pub mod rule;

pub use error::ModelError;
pub use model::Model;
pub use network::NetworkModel;
pub use rule::ReactionRule;

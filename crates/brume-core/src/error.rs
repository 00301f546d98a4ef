//! Error types raised by a propagation step.
//!
//! Only conditions that invalidate the whole run are errors. A reaction or
//! placement that finds no room is an ordinary outcome of a step and is
//! never reported through this enum.

use std::error::Error;
use std::fmt;

use crate::id::ParticleId;
use crate::species::Species;

/// Errors from a single propagation step.
///
/// Every variant is fatal for the current run: the chemical model, the step
/// interval, or the bookkeeping between the work list and the particle
/// space is invalid for this engine.
#[derive(Clone, Debug, PartialEq)]
pub enum PropagatorError {
    /// A reaction rule produced more products than the engine supports
    /// (more than two for a unimolecular rule, more than one for a
    /// bimolecular rule).
    UnsupportedProductCount {
        /// Number of reactants of the offending rule.
        reactants: usize,
        /// Number of products of the offending rule.
        products: usize,
    },
    /// The cumulative bimolecular reaction probability reached 1 within a
    /// single step; the step interval is too long for the given rates.
    ProbabilityOverflow {
        /// The cumulative probability that was reached.
        probability: f64,
        /// The step interval in use.
        dt: f64,
    },
    /// A species referenced by a particle or a rule product has no radius
    /// or diffusion coefficient registered in the model.
    UnknownSpecies {
        /// The species with no attributes.
        species: Species,
    },
    /// A particle due for a step is missing from the particle space.
    ParticleNotFound {
        /// The missing particle.
        pid: ParticleId,
    },
}

impl fmt::Display for PropagatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedProductCount {
                reactants,
                products,
            } => write!(
                f,
                "unsupported reaction: {reactants} reactant(s) with {products} product(s)"
            ),
            Self::ProbabilityOverflow { probability, dt } => write!(
                f,
                "total reaction probability {probability} exceeds 1; step interval {dt} is too long"
            ),
            Self::UnknownSpecies { species } => {
                write!(f, "no attributes registered for species '{species}'")
            }
            Self::ParticleNotFound { pid } => {
                write!(f, "particle {pid} is not in the particle space")
            }
        }
    }
}

impl Error for PropagatorError {}

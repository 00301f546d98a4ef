//! Runtime errors of the simulator.

use std::error::Error;
use std::fmt;

use brume_core::{PropagatorError, Species};
use brume_model::ModelError;
use brume_space::SpaceError;

use crate::config::ConfigError;

/// Errors from constructing or advancing a
/// [`BdSimulator`](crate::BdSimulator).
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Configuration was rejected.
    Config(ConfigError),
    /// The particle space could not be built.
    Space(SpaceError),
    /// The reaction model was rejected.
    Model(ModelError),
    /// A propagation step failed; the step was abandoned and time was not
    /// advanced.
    Propagator(PropagatorError),
    /// A species has no registered radius and diffusion coefficient.
    UnknownSpecies {
        /// The species with no attributes.
        species: Species,
    },
    /// Random placement could not find room for every requested particle.
    NoRoom {
        /// Species being placed.
        species: Species,
        /// Particles placed before giving up.
        placed: usize,
        /// Particles requested.
        requested: usize,
    },
    /// `t + dt` rounds back to `t`, so stepping cannot advance time.
    Stalled {
        /// Simulation time.
        t: f64,
        /// Step interval.
        dt: f64,
    },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Model(e) => write!(f, "model: {e}"),
            Self::Propagator(e) => write!(f, "propagator: {e}"),
            Self::UnknownSpecies { species } => {
                write!(f, "no attributes registered for species '{species}'")
            }
            Self::NoRoom {
                species,
                placed,
                requested,
            } => write!(
                f,
                "no room for species '{species}': placed {placed} of {requested}"
            ),
            Self::Stalled { t, dt } => {
                write!(f, "dt = {dt} is below the resolution of t = {t}")
            }
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Space(e) => Some(e),
            Self::Model(e) => Some(e),
            Self::Propagator(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SpaceError> for SimulationError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<ModelError> for SimulationError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<PropagatorError> for SimulationError {
    fn from(e: PropagatorError) -> Self {
        Self::Propagator(e)
    }
}

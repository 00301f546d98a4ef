//! Simulator configuration, validation, and error types.
//!
//! [`SimulatorConfig`] is the builder-input for constructing a
//! [`BdSimulator`](crate::BdSimulator). [`validate()`](SimulatorConfig::validate)
//! checks structural invariants at startup.

use std::error::Error;
use std::fmt;

use brume_core::Real3;
use brume_model::Model;
use brume_space::SpaceError;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimulatorConfig::validate()`] and step
/// interval selection.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The box edge lengths are unusable.
    Space(SpaceError),
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid value.
        value: f64,
    },
    /// `dt_factor` is NaN, infinite, zero, or negative.
    InvalidDtFactor {
        /// The invalid value.
        value: f64,
    },
    /// `dt` was left to be determined but no registered species diffuses.
    NoMobileSpecies,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::InvalidDtFactor { value } => {
                write!(f, "dt_factor must be finite and positive, got {value}")
            }
            Self::NoMobileSpecies => {
                write!(f, "cannot determine dt: no registered species has D > 0")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── SimulatorConfig ────────────────────────────────────────────────

/// Parameters for constructing a [`BdSimulator`](crate::BdSimulator).
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Edge lengths of the periodic box. Default: unit cube.
    pub edge_lengths: Real3,
    /// Step interval. `None` derives it from the model with
    /// [`determine_dt`]. Default: `None`.
    pub dt: Option<f64>,
    /// Scale applied by [`determine_dt`]. Default: 1e-5.
    pub dt_factor: f64,
    /// Placement attempts for two-product dissociations. Default: 1.
    pub max_retry_count: usize,
    /// Seed for the default random source. Default: 0.
    pub seed: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            edge_lengths: Real3::splat(1.0),
            dt: None,
            dt_factor: 1e-5,
            max_retry_count: 1,
            seed: 0,
        }
    }
}

impl SimulatorConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.edge_lengths.0.iter().all(|l| l.is_finite() && *l > 0.0) {
            return Err(ConfigError::Space(SpaceError::InvalidEdgeLengths {
                reason: format!("{} must be finite and > 0 on every axis", self.edge_lengths),
            }));
        }
        if let Some(dt) = self.dt {
            validate_dt(dt)?;
        }
        if !self.dt_factor.is_finite() || self.dt_factor <= 0.0 {
            return Err(ConfigError::InvalidDtFactor {
                value: self.dt_factor,
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_dt(dt: f64) -> Result<(), ConfigError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDt { value: dt })
    }
}

/// Step interval from the model's species: `dt_factor * (2 r_min)^2 / (2 D_max)`
/// over all species with `D > 0`.
///
/// This is the time a particle of the fastest species needs to diffuse
/// across the diameter of the smallest, scaled by `dt_factor`.
pub fn determine_dt<M: Model + ?Sized>(model: &M, dt_factor: f64) -> Result<f64, ConfigError> {
    let mut r_min = f64::INFINITY;
    let mut d_max = 0.0f64;
    for (_, info) in model.species_attributes() {
        if info.d > 0.0 {
            r_min = r_min.min(info.radius);
            d_max = d_max.max(info.d);
        }
    }
    if d_max == 0.0 {
        return Err(ConfigError::NoMobileSpecies);
    }
    let dt = dt_factor * (2.0 * r_min).powi(2) / (2.0 * d_max);
    validate_dt(dt)?;
    Ok(dt)
}

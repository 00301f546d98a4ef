//! Species names and their physical attributes.

use std::fmt;

/// A chemical species, identified by its serial name.
///
/// Two species are equal iff their names are equal. The ordering is the
/// lexicographic ordering of the names, which gives reaction-rule lookups
/// a canonical key for unordered reactant pairs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Species(String);

impl Species {
    /// Create a species from its serial name.
    pub fn new(serial: impl Into<String>) -> Self {
        Self(serial.into())
    }

    /// The serial name of this species.
    pub fn serial(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Species {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Physical attributes shared by every particle of one species.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeciesInfo {
    /// Hard-sphere radius.
    pub radius: f64,
    /// Diffusion coefficient. Zero marks an immobile species.
    pub d: f64,
}

impl SpeciesInfo {
    /// Create species attributes.
    pub fn new(radius: f64, d: f64) -> Self {
        Self { radius, d }
    }

    /// Check that both attributes are finite and non-negative.
    pub fn validate(&self) -> Result<(), String> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(format!(
                "radius must be finite and >= 0, got {}",
                self.radius
            ));
        }
        if !self.d.is_finite() || self.d < 0.0 {
            return Err(format!(
                "diffusion coefficient must be finite and >= 0, got {}",
                self.d
            ));
        }
        Ok(())
    }
}

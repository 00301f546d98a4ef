//! Error types for reaction rule and model construction.

use std::error::Error;
use std::fmt;

use brume_core::Species;

/// Errors arising from reaction rule and model construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A rule must have one or two reactants.
    InvalidReactantCount {
        /// The number of reactants supplied.
        count: usize,
    },
    /// Rate constants must be finite and non-negative.
    InvalidRate {
        /// The rejected rate constant.
        k: f64,
    },
    /// Species radius or diffusion coefficient failed validation.
    InvalidSpeciesInfo {
        /// The species whose attributes were rejected.
        species: Species,
        /// Description of the validation failure.
        reason: String,
    },
    /// A rule with the same reactants and products is already registered.
    DuplicateRule {
        /// Display form of the rejected rule.
        rule: String,
    },
    /// No registered rule matches.
    RuleNotFound {
        /// Display form of the rule that was looked up.
        rule: String,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidReactantCount { count } => {
                write!(f, "reaction rules take 1 or 2 reactants, got {count}")
            }
            Self::InvalidRate { k } => {
                write!(f, "rate constant must be finite and >= 0, got {k}")
            }
            Self::InvalidSpeciesInfo { species, reason } => {
                write!(f, "invalid attributes for species {species}: {reason}")
            }
            Self::DuplicateRule { rule } => write!(f, "reaction rule already exists: {rule}"),
            Self::RuleNotFound { rule } => write!(f, "reaction rule not found: {rule}"),
        }
    }
}

impl Error for ModelError {}

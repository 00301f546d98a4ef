//! The [`Model`] trait consumed by the propagator.

use brume_core::{Species, SpeciesInfo};

use crate::rule::ReactionRule;

/// Species attributes and reaction rules.
///
/// Rule lists are returned in declaration order: the propagator
/// accumulates probabilities in that order, so it decides which rule fires
/// for a given uniform draw.
pub trait Model {
    /// Radius and diffusion coefficient of `species`, if registered.
    fn species_info(&self, species: &Species) -> Option<SpeciesInfo>;

    /// Every registered species with its attributes.
    fn species_attributes(&self) -> Vec<(Species, SpeciesInfo)>;

    /// First-order rules whose reactant is `species`.
    fn query_reaction_rules(&self, species: &Species) -> Vec<&ReactionRule>;

    /// Second-order rules for the unordered pair `{a, b}`.
    ///
    /// Implementations must return the same rules for `(a, b)` and `(b, a)`.
    fn query_reaction_rules_pair(&self, a: &Species, b: &Species) -> Vec<&ReactionRule>;
}

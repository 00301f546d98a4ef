//! The [`ReactionRule`] type.

use std::fmt;

use brume_core::Species;
use smallvec::SmallVec;

use crate::error::ModelError;

/// Reactant or product list. Rules rarely exceed two species per side.
pub type SpeciesList = SmallVec<[Species; 2]>;

/// A mass-action reaction: reactants turn into products at rate `k`.
///
/// The reactant count is validated at construction (one or two). The
/// product count is not: rules with more products than the propagator
/// supports are accepted here and rejected when they fire.
///
/// # Examples
///
/// ```
/// use brume_model::ReactionRule;
///
/// let bind = ReactionRule::new(["A", "B"], ["C"], 1.5).unwrap();
/// assert_eq!(bind.to_string(), "A + B > C | 1.5");
/// assert!(ReactionRule::new(Vec::<&str>::new(), ["C"], 1.0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionRule {
    reactants: SpeciesList,
    products: SpeciesList,
    k: f64,
}

impl ReactionRule {
    /// Build a rule, validating reactant count and rate.
    pub fn new<R, P>(reactants: R, products: P, k: f64) -> Result<Self, ModelError>
    where
        R: IntoIterator,
        R::Item: Into<Species>,
        P: IntoIterator,
        P::Item: Into<Species>,
    {
        let reactants: SpeciesList = reactants.into_iter().map(Into::into).collect();
        let products: SpeciesList = products.into_iter().map(Into::into).collect();
        if !(1..=2).contains(&reactants.len()) {
            return Err(ModelError::InvalidReactantCount {
                count: reactants.len(),
            });
        }
        if !k.is_finite() || k < 0.0 {
            return Err(ModelError::InvalidRate { k });
        }
        Ok(Self {
            reactants,
            products,
            k,
        })
    }

    /// First-order rule `a > products`.
    pub fn unimolecular<P>(a: impl Into<Species>, products: P, k: f64) -> Result<Self, ModelError>
    where
        P: IntoIterator,
        P::Item: Into<Species>,
    {
        Self::new([a.into()], products, k)
    }

    /// Second-order rule `a + b > products`.
    pub fn bimolecular<P>(
        a: impl Into<Species>,
        b: impl Into<Species>,
        products: P,
        k: f64,
    ) -> Result<Self, ModelError>
    where
        P: IntoIterator,
        P::Item: Into<Species>,
    {
        Self::new([a.into(), b.into()], products, k)
    }

    /// Reactant species in declaration order.
    pub fn reactants(&self) -> &[Species] {
        &self.reactants
    }

    /// Product species in declaration order.
    pub fn products(&self) -> &[Species] {
        &self.products
    }

    /// Rate constant.
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Replace the rate constant.
    pub fn set_k(&mut self, k: f64) -> Result<(), ModelError> {
        if !k.is_finite() || k < 0.0 {
            return Err(ModelError::InvalidRate { k });
        }
        self.k = k;
        Ok(())
    }

    /// True for first-order rules.
    pub fn is_unimolecular(&self) -> bool {
        self.reactants.len() == 1
    }

    /// True if `other` converts the same reactants into the same products.
    ///
    /// Reactant order is ignored; product order and `k` are not compared.
    pub fn same_reaction(&self, other: &ReactionRule) -> bool {
        self.reactant_key() == other.reactant_key() && self.products == other.products
    }

    /// Reactants in canonical (sorted) order.
    pub(crate) fn reactant_key(&self) -> SpeciesList {
        let mut key = self.reactants.clone();
        key.sort();
        key
    }
}

impl fmt::Display for ReactionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_side(f, &self.reactants)?;
        f.write_str(" > ")?;
        write_side(f, &self.products)?;
        write!(f, " | {}", self.k)
    }
}

fn write_side(f: &mut fmt::Formatter<'_>, side: &[Species]) -> fmt::Result {
    for (i, sp) in side.iter().enumerate() {
        if i > 0 {
            f.write_str(" + ")?;
        }
        write!(f, "{sp}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_reactant_counts_outside_one_or_two() {
        assert_eq!(
            ReactionRule::new(Vec::<&str>::new(), ["A"], 1.0),
            Err(ModelError::InvalidReactantCount { count: 0 })
        );
        assert_eq!(
            ReactionRule::new(["A", "B", "C"], ["D"], 1.0),
            Err(ModelError::InvalidReactantCount { count: 3 })
        );
    }

    #[test]
    fn rejects_bad_rates() {
        for k in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ReactionRule::unimolecular("A", ["B"], k),
                Err(ModelError::InvalidRate { .. })
            ));
        }
        let mut r = ReactionRule::unimolecular("A", ["B"], 0.0).unwrap();
        assert!(r.set_k(-0.5).is_err());
        r.set_k(2.0).unwrap();
        assert_eq!(r.k(), 2.0);
    }

    #[test]
    fn accepts_many_products() {
        let r = ReactionRule::unimolecular("A", ["B", "C", "D"], 1.0).unwrap();
        assert_eq!(r.products().len(), 3);
    }

    #[test]
    fn display_degradation() {
        let r = ReactionRule::unimolecular("A", Vec::<&str>::new(), 0.25).unwrap();
        assert_eq!(r.to_string(), "A >  | 0.25");
    }

    #[test]
    fn same_reaction_ignores_reactant_order_and_rate() {
        let ab = ReactionRule::bimolecular("A", "B", ["C"], 1.0).unwrap();
        let ba = ReactionRule::bimolecular("B", "A", ["C"], 2.0).unwrap();
        let other = ReactionRule::bimolecular("A", "B", ["D"], 1.0).unwrap();
        assert!(ab.same_reaction(&ba));
        assert!(!ab.same_reaction(&other));
        assert!(!ab.is_unimolecular());
    }
}

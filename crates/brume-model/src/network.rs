//! An explicit reaction network.

use brume_core::{Species, SpeciesInfo};
use indexmap::IndexMap;

use crate::error::ModelError;
use crate::model::Model;
use crate::rule::ReactionRule;

/// Species attributes plus an explicit list of reaction rules.
///
/// Rules are kept in declaration order and indexed by reactant key.
/// Second-order rules are keyed by the sorted reactant pair, so lookups
/// are symmetric in the two species.
///
/// # Examples
///
/// ```
/// use brume_core::{Species, SpeciesInfo};
/// use brume_model::{Model, NetworkModel, ReactionRule};
///
/// let mut m = NetworkModel::new();
/// m.add_species_attribute("A", SpeciesInfo::new(0.005, 1.0)).unwrap();
/// m.add_reaction_rule(ReactionRule::bimolecular("A", "B", ["C"], 0.1).unwrap()).unwrap();
///
/// let (a, b) = (Species::new("A"), Species::new("B"));
/// assert_eq!(m.query_reaction_rules_pair(&b, &a).len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct NetworkModel {
    species: IndexMap<Species, SpeciesInfo>,
    rules: Vec<ReactionRule>,
    first_order: IndexMap<Species, Vec<usize>>,
    second_order: IndexMap<(Species, Species), Vec<usize>>,
}

impl NetworkModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) the attributes of `species`.
    pub fn add_species_attribute(
        &mut self,
        species: impl Into<Species>,
        info: SpeciesInfo,
    ) -> Result<(), ModelError> {
        let species = species.into();
        if let Err(reason) = info.validate() {
            return Err(ModelError::InvalidSpeciesInfo { species, reason });
        }
        self.species.insert(species, info);
        Ok(())
    }

    /// True if attributes are registered for `species`.
    pub fn has_species(&self, species: &Species) -> bool {
        self.species.contains_key(species)
    }

    /// Forget the attributes of `species`. Returns `false` if absent.
    pub fn remove_species_attribute(&mut self, species: &Species) -> bool {
        self.species.shift_remove(species).is_some()
    }

    /// Append `rule` to the network.
    ///
    /// Returns `Err(ModelError::DuplicateRule)` if a rule with the same
    /// reactants and products is already registered.
    pub fn add_reaction_rule(&mut self, rule: ReactionRule) -> Result<(), ModelError> {
        if self.has_reaction_rule(&rule) {
            return Err(ModelError::DuplicateRule {
                rule: rule.to_string(),
            });
        }
        self.rules.push(rule);
        self.index_rule(self.rules.len() - 1);
        Ok(())
    }

    /// Remove the rule matching `rule` (same reactants and products).
    pub fn remove_reaction_rule(&mut self, rule: &ReactionRule) -> Result<ReactionRule, ModelError> {
        let Some(pos) = self.rules.iter().position(|r| r.same_reaction(rule)) else {
            return Err(ModelError::RuleNotFound {
                rule: rule.to_string(),
            });
        };
        let removed = self.rules.remove(pos);
        self.reindex();
        Ok(removed)
    }

    /// True if a rule with the same reactants and products is registered.
    pub fn has_reaction_rule(&self, rule: &ReactionRule) -> bool {
        self.rules.iter().any(|r| r.same_reaction(rule))
    }

    /// All rules in declaration order.
    pub fn reaction_rules(&self) -> &[ReactionRule] {
        &self.rules
    }

    /// Number of registered rules.
    pub fn num_reaction_rules(&self) -> usize {
        self.rules.len()
    }

    fn index_rule(&mut self, i: usize) {
        let key = self.rules[i].reactant_key();
        match key.as_slice() {
            [a] => self.first_order.entry(a.clone()).or_default().push(i),
            [a, b] => self
                .second_order
                .entry((a.clone(), b.clone()))
                .or_default()
                .push(i),
            // ReactionRule::new admits one or two reactants only.
            _ => unreachable!("reaction rule with {} reactants", key.len()),
        }
    }

    fn reindex(&mut self) {
        self.first_order.clear();
        self.second_order.clear();
        for i in 0..self.rules.len() {
            self.index_rule(i);
        }
    }

    fn collect(&self, indices: Option<&Vec<usize>>) -> Vec<&ReactionRule> {
        indices
            .map(|ix| ix.iter().map(|&i| &self.rules[i]).collect())
            .unwrap_or_default()
    }
}

impl Model for NetworkModel {
    fn species_info(&self, species: &Species) -> Option<SpeciesInfo> {
        self.species.get(species).copied()
    }

    fn species_attributes(&self) -> Vec<(Species, SpeciesInfo)> {
        self.species
            .iter()
            .map(|(sp, info)| (sp.clone(), *info))
            .collect()
    }

    fn query_reaction_rules(&self, species: &Species) -> Vec<&ReactionRule> {
        self.collect(self.first_order.get(species))
    }

    fn query_reaction_rules_pair(&self, a: &Species, b: &Species) -> Vec<&ReactionRule> {
        let key = if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        self.collect(self.second_order.get(&key))
    }
}

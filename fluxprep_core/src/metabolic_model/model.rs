//! This module provides the Model struct, the single store of reactions and compounds
use crate::error::FbaError;
use crate::metabolic_model::compound::Compound;
use crate::metabolic_model::reaction::Reaction;

use indexmap::IndexMap;

/// Represents a Genome Scale Metabolic Model
///
/// Every other view of the model (boundary, runnable, biomass) refers to reactions in this
/// store by id, so bound changes made here are seen by the solver.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    /// Map of reaction ids to Reactions
    pub reactions: IndexMap<String, Reaction>,
    /// Map of compound ids to Compounds
    pub compounds: IndexMap<String, Compound>,
    /// Id associated with the Model
    pub id: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model::default()
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Examples
    /// ```rust
    /// use fluxprep_core::metabolic_model::model::Model;
    /// use fluxprep_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction").build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Add a compound to the model
    ///
    /// # Examples
    /// ```rust
    /// use fluxprep_core::metabolic_model::compound::CompoundBuilder;
    /// use fluxprep_core::metabolic_model::model::Model;
    /// let mut model = Model::new_empty();
    /// let new_compound = CompoundBuilder::default().id("cpd00001_c").build().unwrap();
    /// model.add_compound(new_compound);
    /// ```
    pub fn add_compound(&mut self, compound: Compound) {
        let id = compound.id.clone();
        self.compounds.insert(id, compound);
    }

    /// Resolve the compounds referenced by a reaction, skipping ids not in the model
    pub fn reaction_compounds<'a>(
        &'a self,
        reaction: &'a Reaction,
    ) -> impl Iterator<Item = &'a Compound> + 'a {
        reaction
            .compound_ids()
            .filter_map(|id| self.compounds.get(id))
    }

    /// Ids of every reaction whose name contains `marker`, ignoring case
    pub fn reactions_matching(&self, marker: &str) -> Vec<&str> {
        self.reactions
            .values()
            .filter(|r| r.name_matches(marker))
            .map(|r| r.id.as_str())
            .collect()
    }

    /// Check that the records are well formed before they are classified
    ///
    /// Fails with [`FbaError::MalformedModel`] when an id is empty or disagrees with its key,
    /// a reaction refers to a compound not in the model, bounds are NaN or inverted, or more
    /// than one reaction matches `biomass_marker`.
    pub fn validate(&self, biomass_marker: &str) -> Result<(), FbaError> {
        for (key, cpd) in &self.compounds {
            if cpd.id.is_empty() {
                return Err(FbaError::malformed("compound with an empty id"));
            }
            if key != &cpd.id {
                return Err(FbaError::malformed(format!(
                    "compound keyed as {} has id {}",
                    key, cpd.id
                )));
            }
        }
        for (key, rxn) in &self.reactions {
            if rxn.id.is_empty() {
                return Err(FbaError::malformed("reaction with an empty id"));
            }
            if key != &rxn.id {
                return Err(FbaError::malformed(format!(
                    "reaction keyed as {} has id {}",
                    key, rxn.id
                )));
            }
            if rxn.lower_bound.is_nan() || rxn.upper_bound.is_nan() {
                return Err(FbaError::malformed(format!("reaction {} has a NaN bound", rxn.id)));
            }
            if rxn.lower_bound > rxn.upper_bound {
                return Err(FbaError::malformed(format!(
                    "reaction {} has lower_bound {} > upper_bound {}",
                    rxn.id, rxn.lower_bound, rxn.upper_bound
                )));
            }
            if let Some(missing) = rxn.compound_ids().find(|id| !self.compounds.contains_key(*id)) {
                return Err(FbaError::malformed(format!(
                    "reaction {} refers to unknown compound {}",
                    rxn.id, missing
                )));
            }
        }
        let biomass = self.reactions_matching(biomass_marker);
        if biomass.len() > 1 {
            return Err(FbaError::malformed(format!(
                "more than one biomass reaction: {}",
                biomass.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::compound::CompoundBuilder;
    use crate::metabolic_model::reaction::ReactionBuilder;

    fn setup_model() -> Model {
        let mut model = Model::new_empty();
        model.add_compound(CompoundBuilder::default().id("a").build().unwrap());
        model.add_compound(CompoundBuilder::default().id("b").build().unwrap());
        model.add_reaction(
            ReactionBuilder::default()
                .id("r1")
                .compound("a", -1.)
                .compound("b", 1.)
                .build()
                .unwrap(),
        );
        model
    }

    #[test]
    fn valid_model() {
        setup_model().validate("biomass_equation").unwrap();
    }

    #[test]
    fn unknown_compound() {
        let mut model = setup_model();
        model.add_reaction(
            ReactionBuilder::default()
                .id("r2")
                .compound("z", 1.)
                .build()
                .unwrap(),
        );
        match model.validate("biomass_equation") {
            Err(FbaError::MalformedModel(reason)) => assert!(reason.contains("z")),
            other => panic!("Unknown compound not caught: {:?}", other),
        }
    }

    #[test]
    fn inverted_bounds() {
        let mut model = setup_model();
        model.reactions.get_mut("r1").unwrap().lower_bound = 10.;
        model.reactions.get_mut("r1").unwrap().upper_bound = 5.;
        if let Err(FbaError::MalformedModel(_)) = model.validate("biomass_equation") {
        } else {
            panic!("Inverted bounds not caught")
        }
    }

    #[test]
    fn two_biomass_reactions() {
        let mut model = setup_model();
        for id in ["bio1", "bio2"] {
            model.add_reaction(
                ReactionBuilder::default()
                    .id(id)
                    .name(format!("{} biomass_equation", id))
                    .compound("a", -1.)
                    .build()
                    .unwrap(),
            );
        }
        assert!(matches!(
            model.validate("biomass_equation"),
            Err(FbaError::MalformedModel(_))
        ));
    }

    #[test]
    fn mismatched_key() {
        let mut model = setup_model();
        let cpd = CompoundBuilder::default().id("c").build().unwrap();
        model.compounds.insert("not_c".to_string(), cpd);
        assert!(model.validate("biomass_equation").is_err());
    }
}

//! Partition a model's reactions into biomass, boundary, and runnable sets
use indexmap::IndexSet;
use log::debug;

use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::Reaction;

/// Result of classifying a model's reactions
///
/// Holds reaction ids only, the reactions themselves stay in the [`Model`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Reaction whose flux is maximised, None if no reaction matched the biomass marker
    pub biomass: Option<String>,
    /// Reactions exchanging compounds across the system boundary
    pub boundary: IndexSet<String>,
    /// Every other reaction
    pub runnable: IndexSet<String>,
}

impl Classification {
    /// Borrow the boundary reactions from the model
    pub fn boundary_reactions<'a>(&'a self, model: &'a Model) -> impl Iterator<Item = &'a Reaction> {
        self.boundary
            .iter()
            .filter_map(|id| model.reactions.get(id))
    }

    /// Borrow the runnable reactions from the model
    pub fn runnable_reactions<'a>(&'a self, model: &'a Model) -> impl Iterator<Item = &'a Reaction> {
        self.runnable
            .iter()
            .filter_map(|id| model.reactions.get(id))
    }

    /// Borrow the biomass reaction from the model
    pub fn biomass_reaction<'a>(&self, model: &'a Model) -> Option<&'a Reaction> {
        self.biomass
            .as_ref()
            .and_then(|id| model.reactions.get(id))
    }

    /// Total number of reactions in the three groups
    pub fn len(&self) -> usize {
        self.boundary.len() + self.runnable.len() + usize::from(self.biomass.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify every reaction in the model
///
/// A reaction whose name contains `biomass_marker` (ignoring case) becomes the biomass
/// reaction and is classified no further. Unnamed reactions are never the biomass reaction,
/// even when their id contains the marker. Any other reaction referencing an uptake/secretion
/// compound is a boundary reaction. Every reaction's `is_uptake_secretion` flag is overwritten
/// to match, so classifying again with another marker leaves no stale flags. The remainder
/// are runnable.
///
/// # Examples
/// ```rust
/// use fluxprep_core::metabolic_model::compound::CompoundBuilder;
/// use fluxprep_core::metabolic_model::model::Model;
/// use fluxprep_core::metabolic_model::reaction::ReactionBuilder;
/// use fluxprep_core::prepare::classify::classify_reactions;
///
/// let mut model = Model::new_empty();
/// model.add_compound(CompoundBuilder::default().id("a_e").build().unwrap());
/// model.add_compound(CompoundBuilder::default().id("a_b").uptake_secretion(true).build().unwrap());
/// model.add_reaction(ReactionBuilder::default().id("EX_a").compound("a_e", -1.).compound("a_b", 1.).build().unwrap());
/// model.add_reaction(ReactionBuilder::default().id("bio").name("biomass_equation").compound("a_e", -1.).build().unwrap());
///
/// let classes = classify_reactions(&mut model, "biomass_equation");
/// assert_eq!(classes.biomass.as_deref(), Some("bio"));
/// assert!(classes.boundary.contains("EX_a"));
/// assert!(model.reactions["EX_a"].is_uptake_secretion);
/// ```
pub fn classify_reactions(model: &mut Model, biomass_marker: &str) -> Classification {
    let mut classes = Classification::default();
    let compounds = &model.compounds;
    for (id, reaction) in model.reactions.iter_mut() {
        if reaction.name_matches(biomass_marker) {
            if let Some(previous) = classes.biomass.replace(id.clone()) {
                debug!("Biomass reaction {} replaced by {}", previous, id);
            }
            reaction.is_uptake_secretion = false;
            continue;
        }
        let touches_boundary = reaction
            .compound_ids()
            .any(|cpd| compounds.get(cpd).is_some_and(|c| c.uptake_secretion));
        reaction.is_uptake_secretion = touches_boundary;
        if touches_boundary {
            classes.boundary.insert(id.clone());
        } else {
            classes.runnable.insert(id.clone());
        }
    }
    debug!(
        "Classified {} reactions: {} boundary, {} runnable, biomass {:?}",
        model.reactions.len(),
        classes.boundary.len(),
        classes.runnable.len(),
        classes.biomass
    );
    classes
}

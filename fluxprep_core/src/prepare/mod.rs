//! Model preparation: classify reactions, filter compounds, and reconcile bounds with a medium
//!
//! The three steps run in order over a single [`Model`], mutating it in place (reaction
//! boundary flags and lower bounds) so the solver reads the prepared bounds straight from the
//! model's records.
pub mod classify;
pub mod filter;
pub mod reconcile;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::configuration::{self, Configuration};
use crate::error::FbaError;
use crate::metabolic_model::compound::Compound;
use crate::metabolic_model::medium::Medium;
use crate::metabolic_model::model::Model;
use classify::{classify_reactions, Classification};
use filter::filter_compounds;
use reconcile::reconcile_bounds;

/// A model that has been through preparation, ready to be solved
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedModel {
    /// Reaction partition, by id into the model
    pub classification: Classification,
    /// Compounds which are not on the system boundary
    pub compounds: IndexMap<String, Compound>,
    /// Number of boundary reactions whose lower bound was clamped to zero
    pub clamped: usize,
}

impl PreparedModel {
    /// Size of the runnable part of the stoichiometric system, as
    /// (runnable reactions, filtered compounds)
    pub fn runnable_dimensions(&self) -> (usize, usize) {
        (self.classification.runnable.len(), self.compounds.len())
    }
}

/// Prepare a model using the global configuration
///
/// See [`prepare_model_with`]
pub fn prepare_model(model: &mut Model, medium: &Medium) -> Result<PreparedModel, FbaError> {
    prepare_model_with(model, medium, &configuration::current())
}

/// Validate, classify, filter, and reconcile a model against a medium
///
/// # Errors
/// [`FbaError::MalformedModel`] if the model fails [`Model::validate`], in which case the model
/// is left unchanged. A model without a biomass reaction still prepares, the missing objective
/// is reported when solving.
pub fn prepare_model_with(
    model: &mut Model,
    medium: &Medium,
    config: &Configuration,
) -> Result<PreparedModel, FbaError> {
    model.validate(&config.biomass_marker)?;
    let classification = classify_reactions(model, &config.biomass_marker);
    if classification.biomass.is_none() {
        warn!(
            "No reaction name contains \"{}\", the model has no objective",
            config.biomass_marker
        );
    }
    if classification.runnable.is_empty() {
        warn!("Every non biomass reaction is a boundary reaction");
    }
    let compounds = filter_compounds(&model.compounds);
    let clamped = reconcile_bounds(model, &classification.boundary, medium);
    debug!(
        "Prepared model {:?}: {} runnable reactions x {} compounds",
        model.id,
        classification.runnable.len(),
        compounds.len()
    );
    Ok(PreparedModel {
        classification,
        compounds,
        clamped,
    })
}

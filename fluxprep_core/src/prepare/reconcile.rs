//! Close uptake through boundary reactions whose compounds the medium doesn't supply
use indexmap::IndexSet;
use log::{debug, warn};

use crate::metabolic_model::medium::Medium;
use crate::metabolic_model::model::Model;

/// Clamp the lower bound of boundary reactions not fed by the medium
///
/// For every reaction id in `boundary`, if none of the reaction's compound ids is in `medium`,
/// its lower bound is set to 0.0 so it can only secrete. The upper bound is never touched, and
/// reactions with at least one compound in the medium keep both bounds. Bounds are changed on
/// the model's own records. Running this twice gives the same bounds as running it once.
///
/// A reaction forcing uptake (`upper_bound < 0`) of a compound the medium lacks ends up with
/// `lower_bound > upper_bound`. That is logged at `warn`; the model then fails
/// [`Model::validate`] and its problem is infeasible.
///
/// Membership is an exact compound id lookup, run [`crate::io::media::correct_names`] first if
/// the medium came from a file.
///
/// # Returns
/// The number of reactions whose lower bound was clamped
pub fn reconcile_bounds(model: &mut Model, boundary: &IndexSet<String>, medium: &Medium) -> usize {
    let mut clamped = 0;
    for id in boundary {
        let Some(reaction) = model.reactions.get_mut(id) else {
            continue;
        };
        if reaction.compound_ids().any(|cpd| medium.contains(cpd)) {
            continue;
        }
        if reaction.lower_bound != 0f64 {
            clamped += 1;
        }
        reaction.lower_bound = 0f64;
        if reaction.upper_bound < 0f64 {
            warn!(
                "Boundary reaction {} forces uptake (upper bound {}) of compounds missing from the \
                 medium, its bounds are now inverted and the model can't be solved",
                reaction.id, reaction.upper_bound
            );
        }
    }
    debug!(
        "Reconciled {} boundary reactions against the medium, {} lower bounds clamped",
        boundary.len(),
        clamped
    );
    clamped
}

//! Assembly of the stoichiometric matrix from a prepared model
use indexmap::IndexSet;
use nalgebra_sparse::{CooMatrix, CscMatrix};

use crate::metabolic_model::model::Model;
use crate::prepare::PreparedModel;

/// Compound by reaction coefficient matrix of a prepared model
///
/// Columns are the runnable reactions, then the boundary reactions, then the biomass reaction
/// if there is one. Rows are the filtered (non boundary) compounds used by at least one column,
/// in model order. Boundary compounds have no row, so they are not held at steady state.
#[derive(Debug, Clone)]
pub struct StoichiometricMatrix {
    /// Compound id of each row
    pub compounds: IndexSet<String>,
    /// Reaction id of each column
    pub reactions: IndexSet<String>,
    /// Sparse coefficients
    pub matrix: CscMatrix<f64>,
    /// Number of leading columns which are runnable reactions
    pub runnable_columns: usize,
}

impl StoichiometricMatrix {
    /// Build the matrix from the model's records and its preparation
    pub fn build(model: &Model, prepared: &PreparedModel) -> Self {
        let classes = &prepared.classification;
        let reactions: IndexSet<String> = classes
            .runnable
            .iter()
            .chain(classes.boundary.iter())
            .chain(classes.biomass.iter())
            .cloned()
            .collect();

        let referenced: IndexSet<&str> = reactions
            .iter()
            .filter_map(|id| model.reactions.get(id))
            .flat_map(|r| r.compound_ids())
            .collect();
        let compounds: IndexSet<String> = prepared
            .compounds
            .keys()
            .filter(|id| referenced.contains(id.as_str()))
            .cloned()
            .collect();

        let mut coo = CooMatrix::new(compounds.len(), reactions.len());
        for (col, id) in reactions.iter().enumerate() {
            let Some(reaction) = model.reactions.get(id) else {
                continue;
            };
            for (cpd, coef) in &reaction.compounds {
                if let Some(row) = compounds.get_index_of(cpd) {
                    coo.push(row, col, *coef);
                }
            }
        }

        StoichiometricMatrix {
            compounds,
            reactions,
            matrix: CscMatrix::from(&coo),
            runnable_columns: classes.runnable.len(),
        }
    }

    /// (rows, columns) of the full matrix
    pub fn shape(&self) -> (usize, usize) {
        (self.matrix.nrows(), self.matrix.ncols())
    }

    /// Coefficient of a compound in a reaction, 0 when either is absent
    pub fn coefficient(&self, compound: &str, reaction: &str) -> f64 {
        match (
            self.compounds.get_index_of(compound),
            self.reactions.get_index_of(reaction),
        ) {
            (Some(row), Some(col)) => self
                .matrix
                .get_entry(row, col)
                .map(|entry| entry.into_value())
                .unwrap_or(0f64),
            _ => 0f64,
        }
    }
}

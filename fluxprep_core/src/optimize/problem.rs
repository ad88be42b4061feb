//! Provides the linear program solved during flux balance analysis
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use nalgebra_sparse::CscMatrix;

use crate::error::FbaError;
use crate::metabolic_model::model::Model;
use crate::optimize::stoichiometry::StoichiometricMatrix;
use crate::prepare::PreparedModel;

/// A flux variable, one per reaction column
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Id of the reaction the variable carries the flux of
    pub id: String,
    /// Position of the variable's column in the stoichiometric matrix
    pub index: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Variable {
    /// Whether the bounds pin the variable to a single value
    pub fn is_fixed(&self) -> bool {
        self.lower_bound == self.upper_bound
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <= {} <= {}", self.lower_bound, self.id, self.upper_bound)
    }
}

/// Represents the sense of the objective, whether it should be maximized or minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    /// The objective should be minimized
    Minimize,
    /// The objective should be maximized
    Maximize,
}

/// Steady state flux problem
///
/// Maximize (or minimize) `objective · v` subject to `S v = 0` and
/// `lower_bound <= v <= upper_bound`. Infinite bounds leave that side of a variable open.
#[derive(Debug, Clone)]
pub struct FbaProblem {
    /// One variable per column of `stoichiometry`, keyed by reaction id
    pub variables: IndexMap<String, Variable>,
    /// Compound id of each mass balance row
    pub constraint_ids: Vec<String>,
    /// Mass balance coefficients, compounds by variables
    pub stoichiometry: CscMatrix<f64>,
    /// Objective coefficients keyed by variable id
    pub objective: IndexMap<String, f64>,
    pub sense: ObjectiveSense,
}

impl FbaProblem {
    /// Formulate the problem of maximizing the biomass flux of a prepared model
    ///
    /// Bounds are read from the model's reaction records, so they reflect the bound
    /// reconciliation done during preparation.
    ///
    /// # Errors
    /// [`FbaError::MissingObjective`] when the preparation found no biomass reaction
    pub fn maximize_biomass(model: &Model, prepared: &PreparedModel) -> Result<Self, FbaError> {
        let biomass = prepared
            .classification
            .biomass
            .as_ref()
            .ok_or(FbaError::MissingObjective)?;
        let matrix = StoichiometricMatrix::build(model, prepared);
        let mut variables = IndexMap::with_capacity(matrix.reactions.len());
        for (index, id) in matrix.reactions.iter().enumerate() {
            let reaction = model.reactions.get(id).ok_or_else(|| {
                FbaError::malformed(format!("reaction {} disappeared during preparation", id))
            })?;
            variables.insert(
                id.clone(),
                Variable {
                    id: id.clone(),
                    index,
                    lower_bound: reaction.lower_bound,
                    upper_bound: reaction.upper_bound,
                },
            );
        }
        let mut objective = IndexMap::new();
        objective.insert(biomass.clone(), 1f64);
        Ok(FbaProblem {
            variables,
            constraint_ids: matrix.compounds.into_iter().collect(),
            stoichiometry: matrix.matrix,
            objective,
            sense: ObjectiveSense::Maximize,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraint_ids.len()
    }

    /// Objective coefficient of every variable, in column order
    pub fn objective_coefficients(&self) -> Vec<f64> {
        self.variables
            .keys()
            .map(|id| self.objective.get(id).copied().unwrap_or(0f64))
            .collect()
    }

    /// Evaluate the objective at a point given in column order
    pub fn objective_at(&self, values: &[f64]) -> f64 {
        self.objective_coefficients()
            .iter()
            .zip(values)
            .map(|(c, v)| c * v)
            .sum()
    }
}

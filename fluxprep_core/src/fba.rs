//! Flux balance analysis over a prepared model
use indexmap::IndexMap;
use log::{info, warn};

use crate::configuration::{self, Configuration};
use crate::error::FbaError;
use crate::metabolic_model::medium::Medium;
use crate::metabolic_model::model::Model;
use crate::optimize::problem::FbaProblem;
use crate::optimize::solvers::{default_solver, LinearSolver};
use crate::optimize::OptimizationStatus;
use crate::prepare::{prepare_model, PreparedModel};

/// Outcome of a successful flux balance analysis
#[derive(Debug, Clone, PartialEq)]
pub struct FbaResult {
    /// Optimal or AlmostOptimal
    pub status: OptimizationStatus,
    /// Flux through the biomass reaction
    pub objective_value: f64,
    /// Whether the objective value is above the growth threshold
    pub growth: bool,
    /// Flux of every reaction in the problem, keyed by reaction id
    pub fluxes: IndexMap<String, f64>,
}

/// Run flux balance analysis on a prepared model, with the global configuration
///
/// See [`run_fba_with`]
pub fn run_fba(
    model: &Model,
    prepared: &PreparedModel,
    solver: &dyn LinearSolver,
) -> Result<FbaResult, FbaError> {
    run_fba_with(model, prepared, solver, &configuration::current())
}

/// Maximize the biomass flux of a prepared model
///
/// The bounds are read from `model`, which must be the model `prepared` was made from.
///
/// # Errors
/// - [`FbaError::MissingObjective`] if no biomass reaction was identified
/// - [`FbaError::EmptyModel`] if there are no runnable reactions and
///   `config.reject_empty_model` is set
/// - [`FbaError::SolverInfeasible`] and [`FbaError::SolverUnbounded`] as reported by the solver
/// - [`FbaError::SolverError`] for any other status, or a backend failure
pub fn run_fba_with(
    model: &Model,
    prepared: &PreparedModel,
    solver: &dyn LinearSolver,
    config: &Configuration,
) -> Result<FbaResult, FbaError> {
    if prepared.classification.biomass.is_none() {
        return Err(FbaError::MissingObjective);
    }
    if prepared.classification.runnable.is_empty() {
        if config.reject_empty_model {
            return Err(FbaError::EmptyModel);
        }
        warn!("Solving a model with no runnable reactions");
    }
    let problem = FbaProblem::maximize_biomass(model, prepared)?;
    let solution = solver.solve(&problem)?;
    match solution.status {
        OptimizationStatus::Optimal | OptimizationStatus::AlmostOptimal => {}
        OptimizationStatus::Infeasible => return Err(FbaError::SolverInfeasible),
        OptimizationStatus::Unbounded => return Err(FbaError::SolverUnbounded),
        status => {
            return Err(FbaError::SolverError {
                status,
                message: format!("{} did not reach a solution", solver.name()),
            })
        }
    }
    let objective_value = solution.objective_value.ok_or_else(|| FbaError::SolverError {
        status: solution.status,
        message: format!("{} reported no objective value", solver.name()),
    })?;
    let growth = objective_value > config.growth_threshold;
    info!(
        "{} finished with {:?}: objective {} (growth: {})",
        solver.name(),
        solution.status,
        objective_value,
        growth
    );
    Ok(FbaResult {
        status: solution.status,
        objective_value,
        growth,
        fluxes: solution.variable_values.unwrap_or_default(),
    })
}

/// Prepare a model against a medium and solve it with the configured solver
///
/// # Examples
/// ```rust
/// use fluxprep_core::fba::flux_balance;
/// use fluxprep_core::metabolic_model::medium::Medium;
/// use fluxprep_core::metabolic_model::model::Model;
///
/// let mut model = Model::from_json_str(r#"{
///     "compounds": [
///         {"id": "a_e"}, {"id": "a_b", "compartment": "b"}, {"id": "b_c"}
///     ],
///     "reactions": [
///         {"id": "EX_a", "compounds": {"a_e": -1.0, "a_b": 1.0}, "lower_bound": -10.0},
///         {"id": "A_to_B", "compounds": {"a_e": -1.0, "b_c": 1.0}, "lower_bound": 0.0},
///         {"id": "bio", "name": "biomass_equation", "compounds": {"b_c": -1.0}, "lower_bound": 0.0}
///     ]
/// }"#).unwrap();
/// let result = flux_balance(&mut model, &Medium::from_ids(["a_e"])).unwrap();
/// assert!(result.growth);
/// assert!((result.objective_value - 10.0).abs() < 1e-4);
/// ```
pub fn flux_balance(model: &mut Model, medium: &Medium) -> Result<FbaResult, FbaError> {
    let prepared = prepare_model(model, medium)?;
    run_fba(model, &prepared, default_solver().as_ref())
}

//! Errors raised while preparing and solving a model
use thiserror::Error;

use crate::io::IoError;
use crate::optimize::solvers::SolverError;
use crate::optimize::OptimizationStatus;

/// Errors associated with preparing a model and running flux balance analysis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FbaError {
    /// No biomass (objective) reaction was identified
    #[error("No biomass reaction was identified, refusing to solve without an objective")]
    MissingObjective,
    /// No runnable reactions remain after classification
    #[error("No runnable reactions remain after classification")]
    EmptyModel,
    /// The solver found no flux assignment satisfying the constraints
    #[error("The flux balance problem is infeasible")]
    SolverInfeasible,
    /// The objective can grow without bound
    #[error("The flux balance problem is unbounded")]
    SolverUnbounded,
    /// Any other solver failure, with the status it reported
    #[error("Solver failed with status {status:?}: {message}")]
    SolverError {
        status: OptimizationStatus,
        message: String,
    },
    /// Reaction or compound records are inconsistent
    #[error("Malformed model: {0}")]
    MalformedModel(String),
    /// Failure loading a model or medium
    #[error("Unable to load input: {0}")]
    Io(#[from] IoError),
}

impl FbaError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        FbaError::MalformedModel(reason.into())
    }
}

impl From<SolverError> for FbaError {
    fn from(err: SolverError) -> Self {
        FbaError::SolverError {
            status: OptimizationStatus::Unoptimized,
            message: err.to_string(),
        }
    }
}

//! Solver backends for flux balance problems
pub mod clarabel;
#[cfg(feature = "minilp")]
pub mod microlp;

use thiserror::Error;

use crate::configuration::{self, Solver};
use crate::optimize::problem::FbaProblem;
use crate::optimize::ProblemSolution;

/// A backend able to solve linear flux balance problems
///
/// Infeasible or unbounded problems are reported through the status of the returned
/// [`ProblemSolution`]; `Err` is reserved for failures to run the backend at all.
pub trait LinearSolver {
    /// Short name of the backend, used in logs
    fn name(&self) -> &'static str;

    /// Solve the problem
    fn solve(&self, problem: &FbaProblem) -> Result<ProblemSolution, SolverError>;
}

/// Errors raised when a solver backend can't be run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The backend rejected its setup
    #[error("Solver backend error: {0}")]
    Backend(String),
    /// The problem's matrix doesn't match its variables and constraints
    #[error("Stoichiometric matrix is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
}

/// Check that a problem's matrix agrees with its variables and constraints
pub(crate) fn check_dimensions(problem: &FbaProblem) -> Result<(), SolverError> {
    let (rows, cols) = (problem.stoichiometry.nrows(), problem.stoichiometry.ncols());
    if rows != problem.num_constraints() || cols != problem.num_variables() {
        return Err(SolverError::DimensionMismatch {
            rows,
            cols,
            expected_rows: problem.num_constraints(),
            expected_cols: problem.num_variables(),
        });
    }
    Ok(())
}

/// Solver selected by the global configuration
pub fn default_solver() -> Box<dyn LinearSolver> {
    solver_for(configuration::current().solver)
}

/// Solver for a configured choice, clarabel when the chosen backend isn't compiled in
pub fn solver_for(choice: Solver) -> Box<dyn LinearSolver> {
    match choice {
        Solver::Clarabel => Box::new(clarabel::ClarabelSolver::default()),
        Solver::Microlp => microlp_solver(),
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "minilp")] {
        fn microlp_solver() -> Box<dyn LinearSolver> {
            Box::new(microlp::MicrolpSolver)
        }
    } else {
        fn microlp_solver() -> Box<dyn LinearSolver> {
            log::warn!("microlp solver requested but the minilp feature is disabled, using clarabel");
            Box::new(clarabel::ClarabelSolver::default())
        }
    }
}

/// Build a problem directly from a dense matrix, bounds, and objective
#[cfg(test)]
pub(crate) fn dense_problem(
    s: &[&[f64]],
    bounds: &[(f64, f64)],
    objective: &[f64],
    sense: crate::optimize::problem::ObjectiveSense,
) -> FbaProblem {
    use crate::optimize::problem::Variable;
    use nalgebra_sparse::{CooMatrix, CscMatrix};

    let cols = bounds.len();
    let mut coo = CooMatrix::new(s.len(), cols);
    for (i, row) in s.iter().enumerate() {
        for (j, coef) in row.iter().enumerate() {
            if *coef != 0f64 {
                coo.push(i, j, *coef);
            }
        }
    }
    let variables = bounds
        .iter()
        .enumerate()
        .map(|(index, (lb, ub))| {
            let id = format!("v{}", index);
            (
                id.clone(),
                Variable {
                    id,
                    index,
                    lower_bound: *lb,
                    upper_bound: *ub,
                },
            )
        })
        .collect();
    FbaProblem {
        variables,
        constraint_ids: (0..s.len()).map(|i| format!("c{}", i)).collect(),
        stoichiometry: CscMatrix::from(&coo),
        objective: objective
            .iter()
            .enumerate()
            .map(|(i, c)| (format!("v{}", i), *c))
            .collect(),
        sense,
    }
}

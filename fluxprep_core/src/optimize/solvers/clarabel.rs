//! Implements a solver interface for Clarabel
//!
//! Clarabel solves conic programs of the form
//! `minimize ½xᵀPx + qᵀx subject to Ax + s = b, s ∈ K`. A flux balance problem maps onto it
//! with `P = 0`, the mass balances and any fixed fluxes in a zero cone, and the remaining finite
//! bounds in a nonnegative cone.
use ::clarabel::algebra::CscMatrix as ConicMatrix;
use ::clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use indexmap::IndexMap;
use log::debug;
use nalgebra_sparse::{CooMatrix, CscMatrix};

use crate::configuration;
use crate::optimize::problem::{FbaProblem, ObjectiveSense};
use crate::optimize::solvers::{check_dimensions, LinearSolver, SolverError};
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Interior point solver backed by Clarabel
#[derive(Debug, Clone)]
pub struct ClarabelSolver {
    /// Maximum number of interior point iterations
    pub max_iter: u32,
    /// Feasibility and duality gap tolerance, defaults to the configured tolerance
    pub tolerance: f64,
    /// Print Clarabel's own progress output
    pub verbose: bool,
}

impl Default for ClarabelSolver {
    fn default() -> Self {
        ClarabelSolver {
            max_iter: 200,
            tolerance: configuration::current().tolerance,
            verbose: false,
        }
    }
}

/// Constraint rows in Clarabel's `Ax + s = b` form, equality rows first
struct ConicRows {
    a: CscMatrix<f64>,
    b: Vec<f64>,
    equalities: usize,
    inequalities: usize,
}

/// Lay out the constraint rows of a problem
///
/// Rows are, in order: one mass balance per compound, one row per fixed variable, then
/// `v <= ub` and `-v <= -lb` for each remaining finite bound.
fn conic_rows(problem: &FbaProblem) -> ConicRows {
    let n = problem.num_variables();
    let balances = problem.num_constraints();
    let fixed: Vec<_> = problem
        .variables
        .values()
        .filter(|v| v.is_fixed() && v.lower_bound.is_finite())
        .collect();
    let mut bounds: Vec<(usize, f64, f64)> = Vec::new();
    for var in problem.variables.values() {
        if var.is_fixed() && var.lower_bound.is_finite() {
            continue;
        }
        if var.upper_bound.is_finite() {
            bounds.push((var.index, 1f64, var.upper_bound));
        }
        if var.lower_bound.is_finite() {
            bounds.push((var.index, -1f64, -var.lower_bound));
        }
    }

    let equalities = balances + fixed.len();
    let rows = equalities + bounds.len();
    let mut coo = CooMatrix::new(rows, n);
    let mut b = vec![0f64; rows];
    for (col, col_view) in problem.stoichiometry.col_iter().enumerate() {
        for (row, coef) in col_view.row_indices().iter().zip(col_view.values()) {
            coo.push(*row, col, *coef);
        }
    }
    for (offset, var) in fixed.iter().enumerate() {
        coo.push(balances + offset, var.index, 1f64);
        b[balances + offset] = var.lower_bound;
    }
    for (offset, (col, sign, rhs)) in bounds.iter().enumerate() {
        coo.push(equalities + offset, *col, *sign);
        b[equalities + offset] = *rhs;
    }
    ConicRows {
        a: CscMatrix::from(&coo),
        b,
        equalities,
        inequalities: bounds.len(),
    }
}

/// Convert a nalgebra-sparse matrix into Clarabel's own CSC type
fn to_conic(matrix: &CscMatrix<f64>) -> ConicMatrix<f64> {
    ConicMatrix::new(
        matrix.nrows(),
        matrix.ncols(),
        matrix.col_offsets().to_vec(),
        matrix.row_indices().to_vec(),
        matrix.values().to_vec(),
    )
}

impl From<SolverStatus> for OptimizationStatus {
    fn from(status: SolverStatus) -> Self {
        match status {
            SolverStatus::Solved => OptimizationStatus::Optimal,
            SolverStatus::AlmostSolved => OptimizationStatus::AlmostOptimal,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                OptimizationStatus::Infeasible
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                OptimizationStatus::Unbounded
            }
            SolverStatus::NumericalError => OptimizationStatus::NumericalError,
            SolverStatus::Unsolved => OptimizationStatus::Unoptimized,
            _ => OptimizationStatus::SolverHalted,
        }
    }
}

impl LinearSolver for ClarabelSolver {
    fn name(&self) -> &'static str {
        "clarabel"
    }

    fn solve(&self, problem: &FbaProblem) -> Result<ProblemSolution, SolverError> {
        check_dimensions(problem)?;
        let n = problem.num_variables();
        let rows = conic_rows(problem);

        // Clarabel minimizes, so a maximization objective is negated
        let sign = match problem.sense {
            ObjectiveSense::Maximize => -1f64,
            ObjectiveSense::Minimize => 1f64,
        };
        let q: Vec<f64> = problem
            .objective_coefficients()
            .iter()
            .map(|c| sign * c)
            .collect();
        let p = ConicMatrix::<f64>::zeros((n, n));
        let a = to_conic(&rows.a);
        let mut cones = Vec::with_capacity(2);
        if rows.equalities > 0 {
            cones.push(SupportedConeT::ZeroConeT(rows.equalities));
        }
        if rows.inequalities > 0 {
            cones.push(SupportedConeT::NonnegativeConeT(rows.inequalities));
        }
        let settings = DefaultSettingsBuilder::default()
            .verbose(self.verbose)
            .max_iter(self.max_iter)
            .tol_feas(self.tolerance)
            .tol_gap_abs(self.tolerance)
            .tol_gap_rel(self.tolerance)
            .build()
            .map_err(|e| SolverError::Backend(e.to_string()))?;

        debug!(
            "Solving with clarabel: {} variables, {} equality rows, {} bound rows",
            n, rows.equalities, rows.inequalities
        );
        let mut solver = DefaultSolver::new(&p, &q, &a, &rows.b, &cones, settings);
        solver.solve();

        let status = OptimizationStatus::from(solver.solution.status);
        if !status.is_solved() {
            return Ok(ProblemSolution::failed(status));
        }
        let x = &solver.solution.x;
        let variable_values: IndexMap<String, f64> = problem
            .variables
            .values()
            .map(|v| (v.id.clone(), x[v.index]))
            .collect();
        let dual_values: IndexMap<String, f64> = problem
            .constraint_ids
            .iter()
            .zip(&solver.solution.z)
            .map(|(id, z)| (id.clone(), *z))
            .collect();
        Ok(ProblemSolution {
            status,
            objective_value: Some(problem.objective_at(x)),
            variable_values: Some(variable_values),
            dual_values: Some(dual_values),
        })
    }
}

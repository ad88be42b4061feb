//! Implements a solver interface for microlp, a dense simplex solver written in Rust
use ::microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};
use indexmap::IndexMap;

use crate::optimize::problem::{FbaProblem, ObjectiveSense};
use crate::optimize::solvers::{check_dimensions, LinearSolver, SolverError};
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Simplex solver backed by microlp, requires the minilp feature
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpSolver;

impl LinearSolver for MicrolpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, problem: &FbaProblem) -> Result<ProblemSolution, SolverError> {
        check_dimensions(problem)?;
        let direction = match problem.sense {
            ObjectiveSense::Maximize => OptimizationDirection::Maximize,
            ObjectiveSense::Minimize => OptimizationDirection::Minimize,
        };
        let mut lp = Problem::new(direction);
        let coefficients = problem.objective_coefficients();
        let vars: Vec<_> = problem
            .variables
            .values()
            .map(|v| lp.add_var(coefficients[v.index], (v.lower_bound, v.upper_bound)))
            .collect();

        let mut rows: Vec<LinearExpr> = (0..problem.num_constraints())
            .map(|_| LinearExpr::empty())
            .collect();
        for (col, col_view) in problem.stoichiometry.col_iter().enumerate() {
            for (row, coef) in col_view.row_indices().iter().zip(col_view.values()) {
                rows[*row].add(vars[col], *coef);
            }
        }
        for row in rows {
            lp.add_constraint(row, ComparisonOp::Eq, 0f64);
        }

        match lp.solve() {
            Ok(solution) => {
                let variable_values: IndexMap<String, f64> = problem
                    .variables
                    .values()
                    .map(|v| (v.id.clone(), solution[vars[v.index]]))
                    .collect();
                Ok(ProblemSolution {
                    status: OptimizationStatus::Optimal,
                    objective_value: Some(solution.objective()),
                    variable_values: Some(variable_values),
                    dual_values: None,
                })
            }
            Err(::microlp::Error::Infeasible) => {
                Ok(ProblemSolution::failed(OptimizationStatus::Infeasible))
            }
            Err(::microlp::Error::Unbounded) => {
                Ok(ProblemSolution::failed(OptimizationStatus::Unbounded))
            }
            #[allow(unreachable_patterns)]
            Err(err) => Err(SolverError::Backend(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::solvers::dense_problem;

    #[test]
    fn simple_maximization() {
        // Chain uptake -> v1 -> objective, uptake limited to 10
        let problem = dense_problem(
            &[&[1., -1., 0.], &[0., 1., -1.]],
            &[(0., 10.), (0., 1000.), (0., 1000.)],
            &[0., 0., 1.],
            ObjectiveSense::Maximize,
        );
        let solution = MicrolpSolver.solve(&problem).unwrap();
        assert_eq!(solution.status, OptimizationStatus::Optimal);
        assert!((solution.objective_value.unwrap() - 10.).abs() < 1e-6);
        let values = solution.variable_values.unwrap();
        assert!((values["v1"] - 10.).abs() < 1e-6);
        assert_eq!(solution.dual_values, None);
    }

    #[test]
    fn minimization() {
        let problem = dense_problem(
            &[&[1., -1.]],
            &[(2., 10.), (0., 1000.)],
            &[0., 1.],
            ObjectiveSense::Minimize,
        );
        let solution = MicrolpSolver.solve(&problem).unwrap();
        assert!((solution.objective_value.unwrap() - 2.).abs() < 1e-6);
    }

    #[test]
    fn infeasible() {
        // v0 must be at least 5 but the balance forces it to zero
        let problem = dense_problem(&[&[1.]], &[(5., 1000.)], &[1.], ObjectiveSense::Maximize);
        let solution = MicrolpSolver.solve(&problem).unwrap();
        assert_eq!(solution.status, OptimizationStatus::Infeasible);
        assert_eq!(solution.objective_value, None);
    }

    #[test]
    fn unbounded() {
        // Nothing limits v0 from above
        let problem = dense_problem(
            &[&[1., -1.]],
            &[(0., f64::INFINITY), (0., f64::INFINITY)],
            &[0., 1.],
            ObjectiveSense::Maximize,
        );
        let solution = MicrolpSolver.solve(&problem).unwrap();
        assert_eq!(solution.status, OptimizationStatus::Unbounded);
    }

    #[test]
    fn toy_model_grows() {
        use crate::configuration::Configuration;
        use crate::fba::run_fba_with;
        use crate::metabolic_model::medium::Medium;
        use crate::metabolic_model::model::Model;
        use crate::prepare::prepare_model_with;
        use std::path::PathBuf;

        let data_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("test_models")
            .join("toy_model.json");
        let mut model = Model::read_json(data_path).unwrap();
        let config = Configuration::default();
        let medium = Medium::from_ids(["cpd_glc_e", "cpd_o2_e"]);
        let prepared = prepare_model_with(&mut model, &medium, &config).unwrap();
        let result = run_fba_with(&model, &prepared, &MicrolpSolver, &config).unwrap();
        assert_eq!(result.status, OptimizationStatus::Optimal);
        assert!(result.growth);
        assert!((result.objective_value - 20.).abs() < 1e-6);
    }
}

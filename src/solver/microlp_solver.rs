// microlp Solver Adapter
// Pure-Rust simplex through good_lp; the default backend

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution},
    solver_service::{Result, SolverService},
};
use crate::solver::good_lp_model::{into_domain_solution, trivially_infeasible, GoodLpModel};
use good_lp::{solvers::microlp::microlp, SolverModel};
use std::time::Instant;
use tracing::debug;

pub struct MicrolpSolver;

impl MicrolpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicrolpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for MicrolpSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        if let Some(solution) = trivially_infeasible(problem, start_time) {
            return Ok(solution);
        }
        let GoodLpModel {
            vars,
            columns,
            objective,
            constraints,
        } = GoodLpModel::build(problem);

        let mut lp_model = vars.minimise(objective).using(microlp);
        for constraint in constraints {
            lp_model = lp_model.with(constraint);
        }

        debug!(
            problem = %problem.name,
            variables = problem.num_variables(),
            constraints = problem.num_constraints(),
            "handing model to microlp"
        );
        let result = lp_model.solve();
        into_domain_solution(result, problem, &columns, start_time, self.name())
    }

    fn name(&self) -> &str {
        "microlp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Constraint, ConstraintType, ObjectiveFunction, SolutionStatus, SolverError, Variable,
    };
    use approx::assert_abs_diff_eq;

    // max 3x + 2y  s.t.  x + y <= 4,  x + 3y <= 7,  0 <= x <= 3,  y >= 0
    fn production_problem() -> OptimizationProblem {
        let mut problem = OptimizationProblem::new("production");
        problem.add_variable(Variable::continuous("x").with_bounds(0.0, Some(3.0)));
        problem.add_variable(Variable::continuous("y"));
        problem.add_constraint(
            Constraint::new(ConstraintType::LessThanOrEqual, vec![1.0, 1.0], 4.0).with_name("a"),
        );
        problem.add_constraint(
            Constraint::new(ConstraintType::LessThanOrEqual, vec![1.0, 3.0], 7.0).with_name("b"),
        );
        problem.set_objective(ObjectiveFunction::maximize(vec![3.0, 2.0]));
        problem
    }

    #[test]
    fn solves_maximization() {
        let solution = MicrolpSolver::new().solve(&production_problem()).unwrap();
        assert!(solution.is_optimal());
        assert_abs_diff_eq!(solution.optimal_value.unwrap(), 11.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.variable_values[0], 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.variable_values[1], 1.0, epsilon = 1e-6);
        assert_eq!(solution.statistics.num_variables, 2);
        assert_eq!(solution.statistics.num_constraints, 2);
    }

    #[test]
    fn solves_minimization_with_equality() {
        let mut problem = OptimizationProblem::new("split");
        problem.add_variable(Variable::continuous("a").with_bounds(0.0, Some(1.0)));
        problem.add_variable(Variable::continuous("b").with_bounds(0.0, Some(1.0)));
        problem.add_constraint(Constraint::new(ConstraintType::Equal, vec![1.0, 1.0], 1.0));
        problem.set_objective(ObjectiveFunction::minimize(vec![4.0, 1.5]));

        let solution = MicrolpSolver::new().solve(&problem).unwrap();
        assert_abs_diff_eq!(solution.optimal_value.unwrap(), 1.5, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.variable_values[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn reports_infeasible_problem() {
        let mut problem = OptimizationProblem::new("impossible");
        problem.add_variable(Variable::continuous("x").with_bounds(0.0, Some(3.0)));
        problem.add_constraint(Constraint::new(
            ConstraintType::GreaterThanOrEqual,
            vec![1.0],
            5.0,
        ));
        problem.set_objective(ObjectiveFunction::minimize(vec![1.0]));

        let solution = MicrolpSolver::new().solve(&problem).unwrap();
        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(solution.optimal_value.is_none());
    }

    #[test]
    fn empty_rows_are_checked_directly() {
        let mut problem = production_problem();
        problem.add_constraint(
            Constraint::new(ConstraintType::LessThanOrEqual, vec![0.0, 0.0], 1.0).with_name("idle"),
        );
        let solution = MicrolpSolver::new().solve(&problem).unwrap();
        assert_abs_diff_eq!(solution.optimal_value.unwrap(), 11.0, epsilon = 1e-6);

        problem.add_constraint(
            Constraint::new(ConstraintType::GreaterThanOrEqual, vec![0.0, 0.0], 2.0)
                .with_name("never"),
        );
        let solution = MicrolpSolver::new().solve(&problem).unwrap();
        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(solution.message.contains("'never'"));
    }

    #[test]
    fn rejects_invalid_problem_before_solving() {
        let mut problem = production_problem();
        problem.constraints[0].coefficients.pop();
        assert!(matches!(
            MicrolpSolver::new().solve(&problem),
            Err(SolverError::InvalidProblem(_))
        ));
    }
}

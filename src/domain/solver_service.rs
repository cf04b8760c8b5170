// Domain service interface for solving linear programs
// Any LP backend plugs in behind this trait; the formulation never sees backend types

use super::models::{OptimizationProblem, Solution};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Capability interface for LP solvers
///
/// `solve` returns `Ok` with a non-optimal [`Solution`] when the problem is
/// infeasible or unbounded; `Err` is reserved for malformed problems and
/// backend failures.
pub trait SolverService: Send + Sync {
    /// Solve a linear program
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution>;

    /// Validate a problem without solving it
    fn validate(&self, problem: &OptimizationProblem) -> Result<()> {
        let mut errors = Vec::new();

        let num_vars = problem.num_variables();
        if num_vars == 0 {
            errors.push("Problem must declare at least one variable".to_string());
        }

        if problem.objective.num_variables() != num_vars {
            errors.push(format!(
                "Objective has {} coefficients but problem has {} variables",
                problem.objective.num_variables(),
                num_vars
            ));
        }

        for (i, constraint) in problem.constraints.iter().enumerate() {
            if constraint.num_variables() != num_vars {
                errors.push(format!(
                    "Constraint {} '{}' has {} coefficients but problem has {} variables",
                    i,
                    constraint.name,
                    constraint.num_variables(),
                    num_vars
                ));
            }
            let finite = constraint.bound.is_finite()
                && constraint.coefficients.iter().all(|c| c.is_finite());
            if !finite {
                errors.push(format!(
                    "Constraint {} '{}' has a non-finite coefficient or bound",
                    i, constraint.name
                ));
            }
        }

        if problem.objective.coefficients.iter().any(|c| !c.is_finite()) {
            errors.push("Objective has a non-finite coefficient".to_string());
        }

        for (i, var) in problem.variables.iter().enumerate() {
            if let Some(upper) = var.upper_bound {
                if var.lower_bound > upper {
                    errors.push(format!(
                        "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                        i, var.name, var.lower_bound, upper
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;
}

// Translation between the domain LP and good_lp, shared by every good_lp backend

use crate::domain::{
    models::{Constraint, OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError},
    value_objects::{ConstraintType, OptimizationType, SolutionStatus as DomainSolutionStatus},
};
use good_lp::{
    constraint as lp_constraint, variable, Constraint as GoodLpConstraint, Expression,
    ProblemVariables, ResolutionError, Solution as GoodLpSolutionTrait, Variable as GoodLpVariable,
};
use std::time::Instant;

/// A domain problem expressed with good_lp variables and expressions,
/// ready to be handed to any good_lp solver.
pub(crate) struct GoodLpModel {
    pub vars: ProblemVariables,
    pub columns: Vec<GoodLpVariable>,
    pub objective: Expression,
    pub constraints: Vec<GoodLpConstraint>,
}

impl GoodLpModel {
    pub fn build(problem: &OptimizationProblem) -> Self {
        let mut vars = ProblemVariables::new();
        let mut columns: Vec<GoodLpVariable> = Vec::with_capacity(problem.num_variables());

        for var_def in &problem.variables {
            let lower = var_def.lower_bound;
            let upper = var_def.upper_bound.unwrap_or(f64::INFINITY);
            columns.push(vars.add(variable().min(lower).max(upper)));
        }

        // good_lp minimizes, so negate for maximization
        let is_maximize = problem.objective.optimization_type == OptimizationType::Maximize;
        let mut objective: Expression = 0.into();
        for (i, &coeff) in problem.objective.coefficients.iter().enumerate() {
            if coeff != 0.0 {
                let c = if is_maximize { -coeff } else { coeff };
                objective += c * columns[i];
            }
        }

        // rows without a variable are settled by `trivially_infeasible`
        let constraints = problem
            .constraints
            .iter()
            .filter(|constraint| !is_empty_row(constraint))
            .map(|constraint| {
                let mut lhs: Expression = 0.into();
                for (i, &coeff) in constraint.coefficients.iter().enumerate() {
                    if coeff != 0.0 {
                        lhs += coeff * columns[i];
                    }
                }
                match constraint.constraint_type {
                    ConstraintType::LessThanOrEqual => lp_constraint::leq(lhs, constraint.bound),
                    ConstraintType::Equal => lp_constraint::eq(lhs, constraint.bound),
                    ConstraintType::GreaterThanOrEqual => lp_constraint::geq(lhs, constraint.bound),
                }
            })
            .collect();

        Self {
            vars,
            columns,
            objective,
            constraints,
        }
    }
}

fn is_empty_row(constraint: &Constraint) -> bool {
    constraint.coefficients.iter().all(|&coeff| coeff == 0.0)
}

/// A row with no variables that `0 <op> bound` already violates
pub(crate) fn trivially_infeasible(
    problem: &OptimizationProblem,
    start_time: Instant,
) -> Option<DomainSolution> {
    let row = problem.constraints.iter().find(|constraint| {
        is_empty_row(constraint) && !constraint.constraint_type.holds(0.0, constraint.bound, 0.0)
    })?;
    let statistics = SolverStatistics {
        solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
        num_variables: problem.num_variables() as u32,
        num_constraints: problem.num_constraints() as u32,
    };
    Some(
        DomainSolution::new(
            DomainSolutionStatus::Infeasible,
            format!(
                "Problem is infeasible: constraint '{}' reads 0 {} {}",
                row.name, row.constraint_type, row.bound
            ),
        )
        .with_statistics(statistics),
    )
}

/// Map a good_lp resolution onto a domain solution
pub(crate) fn into_domain_solution<S: GoodLpSolutionTrait>(
    result: std::result::Result<S, ResolutionError>,
    problem: &OptimizationProblem,
    columns: &[GoodLpVariable],
    start_time: Instant,
    backend: &str,
) -> Result<DomainSolution> {
    let statistics = SolverStatistics {
        solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
        num_variables: problem.num_variables() as u32,
        num_constraints: problem.num_constraints() as u32,
    };

    match result {
        Ok(sol) => {
            let variable_values: Vec<f64> = columns.iter().map(|&var| sol.value(var)).collect();
            let actual_obj = problem.objective.evaluate(&variable_values);

            let mut solution =
                DomainSolution::optimal(actual_obj, variable_values).with_statistics(statistics);
            solution.message = format!("Optimal solution found for '{}'", problem.name);
            Ok(solution)
        }
        Err(ResolutionError::Infeasible) => Ok(DomainSolution::new(
            DomainSolutionStatus::Infeasible,
            "Problem is infeasible: no solution satisfies all constraints",
        )
        .with_statistics(statistics)),
        Err(ResolutionError::Unbounded) => Ok(DomainSolution::new(
            DomainSolutionStatus::Unbounded,
            "Problem is unbounded: objective can be improved infinitely",
        )
        .with_statistics(statistics)),
        Err(e) => Err(SolverError::ExecutionFailed(format!("{}: {:?}", backend, e))),
    }
}

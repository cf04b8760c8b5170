// Model formulator: builds the facility-location LP relaxation and solves it
// through whichever SolverService it was given

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::instance_parser::{self, ParseError};
use super::location_solution::{cost_breakdown, LocationOutcome, LocationSolution};
use crate::domain::{
    Constraint, ConstraintType, Matrix, ObjectiveFunction, OptimizationProblem, ProblemInstance,
    SolverError, SolverService, Variable,
};

#[derive(Debug, Error)]
pub enum FormulationError {
    #[error("degenerate instance: {0}")]
    DegenerateInstance(String),

    #[error("solver returned {found} values for {expected} variables")]
    MalformedSolution { expected: usize, found: usize },

    #[error(transparent)]
    Solver(#[from] SolverError),
}

pub type Result<T> = std::result::Result<T, FormulationError>;

/// Owns one instance and turns it into a fresh LP on every solve
pub struct Formulator {
    instance: ProblemInstance,
    solver: Arc<dyn SolverService>,
}

impl Formulator {
    pub fn new(instance: ProblemInstance, solver: Arc<dyn SolverService>) -> Self {
        Self { instance, solver }
    }

    /// Parse `path` and pair the instance with `solver`
    pub fn from_file(
        path: impl AsRef<Path>,
        solver: Arc<dyn SolverService>,
    ) -> std::result::Result<Self, ParseError> {
        let instance = instance_parser::parse_instance(path)?;
        Ok(Self::new(instance, solver))
    }

    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    /// Column of `x[facility][customer]`
    pub fn variable_index(&self, facility: usize, customer: usize) -> usize {
        facility * self.instance.num_customers() + customer
    }

    /// Build the linear program without solving it
    ///
    /// Variables `x[f][c]` in [0, 1] are laid out facility-major. Constraints
    /// are demand coverage per customer, then capacity per facility, then the
    /// truck limit per facility.
    pub fn build_problem(&self) -> Result<OptimizationProblem> {
        check_divisors(&self.instance)?;

        let inst = &self.instance;
        let (customers, facilities) = (inst.num_customers(), inst.num_facilities());
        let width = customers * facilities;
        let limit = inst.truck_distance_limit();

        let mut problem = OptimizationProblem::new("facility_location").with_description(format!(
            "{} customers, {} facilities",
            customers, facilities
        ));

        for f in 0..facilities {
            for c in 0..customers {
                problem.add_variable(
                    Variable::continuous(format!("x_f{}_c{}", f, c)).with_bounds(0.0, Some(1.0)),
                );
            }
        }

        for c in 0..customers {
            let mut coefficients = vec![0.0; width];
            for f in 0..facilities {
                coefficients[self.variable_index(f, c)] = 1.0;
            }
            problem.add_constraint(
                Constraint::new(ConstraintType::Equal, coefficients, 1.0)
                    .with_name(format!("Demand_C{}", c)),
            );
        }

        for f in 0..facilities {
            let mut coefficients = vec![0.0; width];
            for c in 0..customers {
                coefficients[self.variable_index(f, c)] = inst.demand()[c];
            }
            problem.add_constraint(
                Constraint::new(ConstraintType::LessThanOrEqual, coefficients, inst.capacity()[f])
                    .with_name(format!("CapacityConstraint_F{}", f)),
            );
        }

        for f in 0..facilities {
            let mut coefficients = vec![0.0; width];
            for c in 0..customers {
                coefficients[self.variable_index(f, c)] = inst.distance()[(c, f)] / limit;
            }
            problem.add_constraint(
                Constraint::new(
                    ConstraintType::LessThanOrEqual,
                    coefficients,
                    inst.max_vehicles_per_facility() as f64,
                )
                .with_name(format!("TruckLimit_F{}", f)),
            );
        }

        // opening cost prorated by utilization + allocation cost + truck usage
        let mut objective = vec![0.0; width];
        for f in 0..facilities {
            let opening_rate = inst.opening_cost()[f] / inst.capacity()[f];
            for c in 0..customers {
                objective[self.variable_index(f, c)] = opening_rate * inst.demand()[c]
                    + inst.allocation_cost()[(c, f)]
                    + inst.truck_usage_cost() * inst.distance()[(c, f)] / limit;
            }
        }
        problem.set_objective(ObjectiveFunction::minimize(objective));

        debug!(
            variables = problem.num_variables(),
            demand_rows = customers,
            capacity_rows = facilities,
            truck_rows = facilities,
            max_vehicles = inst.max_vehicles_per_facility(),
            "built facility-location model"
        );
        Ok(problem)
    }

    /// Build a fresh model, solve it, and map the result back onto the instance
    pub fn solve(&self) -> Result<LocationOutcome> {
        let problem = self.build_problem()?;

        info!(solver = self.solver.name(), "solving {}", problem.description);
        let start = Instant::now();
        let solution = self.solver.solve(&problem)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let objective_value = match solution.optimal_value {
            Some(value) if solution.is_optimal() => value,
            _ => {
                warn!(status = %solution.status, elapsed_ms, "{}", solution.message);
                return Ok(LocationOutcome::NoSolution {
                    status: solution.status,
                    message: solution.message,
                });
            }
        };

        let expected = problem.num_variables();
        let found = solution.variable_values.len();
        if found != expected {
            return Err(FormulationError::MalformedSolution { expected, found });
        }

        let allocation = Matrix::reshape(
            solution.variable_values,
            self.instance.num_facilities(),
            self.instance.num_customers(),
        )
        .map_err(|_| FormulationError::MalformedSolution { expected, found })?;
        let breakdown = cost_breakdown(&self.instance, &allocation);

        info!(
            objective = objective_value,
            opening = breakdown.opening,
            allocation = breakdown.allocation,
            truck_usage = breakdown.truck_usage,
            elapsed_ms,
            "optimal allocation found"
        );
        Ok(LocationOutcome::Solved(LocationSolution {
            objective_value,
            allocation,
            breakdown,
            statistics: solution.statistics,
        }))
    }
}

/// Capacities and the truck distance limit divide objective and constraint
/// coefficients; a zero would turn them into NaN or infinity.
fn check_divisors(instance: &ProblemInstance) -> Result<()> {
    if instance.truck_distance_limit() == 0.0 {
        return Err(FormulationError::DegenerateInstance(
            "truck_distance_limit is 0, truck usage cannot be estimated".to_string(),
        ));
    }
    let zero: Vec<String> = instance
        .capacity()
        .iter()
        .enumerate()
        .filter(|(_, &capacity)| capacity == 0.0)
        .map(|(f, _)| f.to_string())
        .collect();
    if !zero.is_empty() {
        return Err(FormulationError::DegenerateInstance(format!(
            "facilities [{}] have zero capacity, opening cost cannot be prorated",
            zero.join(", ")
        )));
    }
    Ok(())
}

// Runner: parse -> formulate -> solve for one configured instance

use std::fmt;

use thiserror::Error;
use tracing::info;

use super::config::RunConfig;
use crate::application::{FormulationError, Formulator, LocationOutcome, ParseError};
use crate::domain::SolverError;
use crate::solver::SolverFactory;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Formulation(#[from] FormulationError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

pub fn run(config: &RunConfig) -> Result<LocationOutcome, RunError> {
    let solver = SolverFactory::create_from_backend(config.backend)?;
    info!(
        backend = %config.backend,
        solver = solver.name(),
        path = %config.instance_path.display(),
        "loading instance"
    );

    let formulator = Formulator::from_file(&config.instance_path, solver)?;
    let instance = formulator.instance();
    info!(
        customers = instance.num_customers(),
        facilities = instance.num_facilities(),
        max_vehicles = instance.max_vehicles_per_facility(),
        total_demand = instance.total_demand(),
        total_capacity = instance.total_capacity(),
        "instance loaded"
    );

    Ok(formulator.solve()?)
}

/// Plain-text summary of an outcome
pub struct Report<'a> {
    pub outcome: &'a LocationOutcome,
    pub show_allocation: bool,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "status: {}", self.outcome.status())?;
        let solution = match self.outcome {
            LocationOutcome::Solved(solution) => solution,
            LocationOutcome::NoSolution { message, .. } => {
                return writeln!(f, "no solution: {}", message);
            }
        };

        writeln!(f, "objective: {:.6}", solution.objective_value)?;
        writeln!(f, "  opening cost:    {:.6}", solution.breakdown.opening)?;
        writeln!(f, "  allocation cost: {:.6}", solution.breakdown.allocation)?;
        writeln!(f, "  truck usage:     {:.6}", solution.breakdown.truck_usage)?;

        if self.show_allocation {
            writeln!(f, "allocation (facility x customer):")?;
            for facility in 0..solution.allocation.rows() {
                write!(f, "  F{}:", facility)?;
                for x in solution.allocation.row(facility) {
                    write!(f, " {:.4}", x)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

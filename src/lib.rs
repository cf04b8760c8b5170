// Domain layer: instance, LP model and the solver contract
pub mod domain;

// Application layer: parsing and formulation use cases
pub mod application;

// Infrastructure layer: configuration, logging, run loop
pub mod infrastructure;

// Solver adapters: concrete implementations of SolverService
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Constraint, ConstraintType, InstanceData, InstanceError, Matrix, ObjectiveFunction,
    OptimizationProblem, OptimizationType, ProblemInstance, Solution, SolutionStatus,
    SolverBackend, SolverError, SolverService, Variable,
};

pub use application::{
    parse_instance, parse_instance_str, CostBreakdown, FeasibilityViolation, FormulationError,
    Formulator, LocationOutcome, LocationSolution, ParseError,
};

pub use infrastructure::{run, RunConfig, RunError};

pub use solver::SolverFactory;
#[cfg(feature = "coin_cbc")]
pub use solver::CoinCbcSolver;
#[cfg(feature = "highs")]
pub use solver::HighsSolver;
#[cfg(feature = "microlp")]
pub use solver::MicrolpSolver;

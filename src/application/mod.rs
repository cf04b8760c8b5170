// Application layer: instance parsing and model formulation use cases

pub mod formulator;
pub mod instance_parser;
pub mod location_solution;

pub use formulator::{FormulationError, Formulator};
pub use instance_parser::{parse_instance, parse_instance_str, ParseError};
pub use location_solution::{CostBreakdown, FeasibilityViolation, LocationOutcome, LocationSolution};

// Infrastructure: configuration, logging and the command-line run loop

pub mod config;
pub mod logging;
pub mod runner;

pub use config::{Cli, RunConfig};
pub use logging::init_tracing;
pub use runner::{run, Report, RunError};

// Run configuration: command-line arguments with environment fallbacks

use std::path::PathBuf;

use clap::Parser;

use crate::domain::SolverBackend;

#[derive(Debug, Parser)]
#[command(name = "facloc")]
#[command(about = "Solve a capacitated facility-location instance as a linear relaxation", long_about = None)]
pub struct Cli {
    /// Instance file in the seven-line facility-location format
    #[arg(env = "FACLOC_INSTANCE")]
    pub instance: PathBuf,

    /// LP backend (auto, microlp, coin-cbc, highs)
    #[arg(short, long, env = "FACLOC_BACKEND", default_value_t = SolverBackend::Auto)]
    pub backend: SolverBackend,

    /// Print the facility x customer allocation matrix
    #[arg(short = 'a', long)]
    pub show_allocation: bool,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub instance_path: PathBuf,
    pub backend: SolverBackend,
    pub show_allocation: bool,
}

impl RunConfig {
    pub fn new(instance_path: impl Into<PathBuf>) -> Self {
        Self {
            instance_path: instance_path.into(),
            backend: SolverBackend::Auto,
            show_allocation: false,
        }
    }

    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_allocation(mut self, show_allocation: bool) -> Self {
        self.show_allocation = show_allocation;
        self
    }
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig::new(cli.instance)
            .with_backend(cli.backend)
            .with_allocation(cli.show_allocation)
    }
}

use std::process::ExitCode;

use clap::Parser;
use facloc::infrastructure::{init_tracing, run, Cli, Report, RunConfig};
use tracing::error;

fn main() -> ExitCode {
    // .env values act as defaults for the FACLOC_* fallbacks
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("could not initialise logging: {}", e);
    }

    let config = RunConfig::from(cli);
    match run(&config) {
        Ok(outcome) => {
            print!(
                "{}",
                Report {
                    outcome: &outcome,
                    show_allocation: config.show_allocation,
                }
            );
            if outcome.is_solved() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

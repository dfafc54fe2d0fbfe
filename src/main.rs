//! nrf24prog - SPI programmer front end for Nordic nRF24 MCUs
//!
//! Detects nRF24LE1 / nRF24LU1+ devices attached to a SPI programmer and
//! decodes their flash status register.

mod cli;
mod commands;
mod programmers;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    match cli.command {
        Commands::Probe { programmer, chip } => {
            let mut master = programmers::open_programmer(&programmer)?;
            commands::run_probe(&mut master, chip.as_deref())
        }
        Commands::Status { programmer, chip } => {
            let mut master = programmers::open_programmer(&programmer)?;
            commands::run_status(&mut master, chip.as_deref())
        }
        Commands::ListProgrammers => {
            commands::list_programmers();
            Ok(())
        }
        Commands::ListChips => {
            commands::list_chips();
            Ok(())
        }
    }
}

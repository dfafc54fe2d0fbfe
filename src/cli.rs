//! CLI argument parsing

use crate::programmers;
use clap::{Parser, Subcommand};

/// Generate dynamic help text for the programmer argument
fn programmer_help() -> String {
    format!(
        "Programmer to use [available: {}]",
        programmers::programmer_names_short()
    )
}

#[derive(Parser)]
#[command(name = "nrf24prog")]
#[command(author, version, about = "nRF24LE1 / nRF24LU1+ SPI programmer", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect an nRF24 device
    Probe {
        /// Programmer to use
        #[arg(short, long, help = programmer_help())]
        programmer: String,

        /// Only consider this chip definition
        #[arg(short, long)]
        chip: Option<String>,
    },

    /// Decode the flash status register
    Status {
        /// Programmer to use
        #[arg(short, long, help = programmer_help())]
        programmer: String,

        /// Only consider this chip definition
        #[arg(short, long)]
        chip: Option<String>,
    },

    /// List available programmers
    ListProgrammers,

    /// List supported chips
    ListChips,
}

//! CLI command implementations
//!
//! Probe and status commands work on any `SpiMaster`; the list commands
//! only print static tables.

mod list;
mod probe;
mod status;

pub use list::{list_chips, list_programmers};
pub use probe::run_probe;
pub use status::run_status;

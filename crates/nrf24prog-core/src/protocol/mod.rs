//! Protocol implementations
//!
//! This module contains the SPI command sequences shared by the chip
//! drivers: status register access and memory reads.

mod spi25;

pub use spi25::*;

//! nrf24prog-core - Core library for programming Nordic nRF24 MCUs over SPI
//!
//! The nRF24LE1 and nRF24LU1+ expose their embedded flash through a small
//! SPI command set that looks a lot like a SPI25 flash chip, but without any
//! identification command. This crate provides the pieces needed to talk to
//! them through any SPI programmer:
//!
//! - [`spi`] - SPI transaction model and opcodes
//! - [`programmer`] - the [`SpiMaster`](programmer::SpiMaster) trait programmers implement
//! - [`protocol`] - status register and read command sequences
//! - [`chip`] - the chip table, FSR decoding and the family probe
//! - [`diag`] - pluggable sink for diagnostic output
//!
//! It is `no_std` compatible; enable `alloc` or `std` for the extras.
//!
//! # Example
//!
//! ```ignore
//! use nrf24prog_core::chip::nrf24;
//! use nrf24prog_core::programmer::SpiMaster;
//!
//! fn check<M: SpiMaster>(master: &mut M) -> nrf24prog_core::Result<()> {
//!     if nrf24::probe_family(master) {
//!         nrf24::decode_and_log_status(master)?;
//!     }
//!     Ok(())
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
// Allow async fn in traits - we use maybe-async for dual sync/async support
#![allow(async_fn_in_trait)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod chip;
pub mod diag;
pub mod error;
pub mod programmer;
pub mod protocol;
pub mod spi;

pub use error::{Error, Result};

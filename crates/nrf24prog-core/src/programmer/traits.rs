//! Programmer trait definitions
//!
//! These traits use `maybe_async` to support both sync and async modes.
//! - With the `is_sync` feature (the default), traits are synchronous
//! - Without it, traits are async (suitable for WASM/web, Embassy, tokio)

use crate::error::Result;
use crate::spi::SpiCommand;
use maybe_async::maybe_async;

/// SPI Master trait (sync or async depending on `is_sync` feature)
///
/// This trait represents a programmer that can execute SPI commands. It is
/// the only way the chip drivers touch the device: register reads, register
/// writes and memory reads are all expressed as [`SpiCommand`]s.
///
/// A master is borrowed mutably for the duration of each driver call, so a
/// single device can never be driven from two places at once.
#[maybe_async(AFIT)]
pub trait SpiMaster {
    /// Get the maximum number of bytes that can be read in a single transaction
    fn max_read_len(&self) -> usize;

    /// Get the maximum number of bytes that can be written in a single transaction
    fn max_write_len(&self) -> usize;

    /// Execute a single SPI command
    ///
    /// The command contains all the information needed for the transaction:
    /// - `opcode`: The SPI command opcode
    /// - `address`: Optional address (with width)
    /// - `write_data`: Data to write after the header
    /// - `read_buf`: Buffer to read data into
    async fn execute(&mut self, cmd: &mut SpiCommand<'_>) -> Result<()>;

    /// Check if an opcode is supported by this programmer
    ///
    /// Some programmers have restrictions on which opcodes can be executed.
    /// Returns true if the opcode is allowed.
    fn probe_opcode(&self, _opcode: u8) -> bool {
        true
    }

    /// Delay for the specified number of microseconds
    async fn delay_us(&mut self, us: u32);
}

// Blanket impl for boxed SPI masters to allow trait objects (sync mode only)
// In async mode, traits with async fn are not object-safe
#[cfg(all(feature = "alloc", feature = "is_sync"))]
impl SpiMaster for alloc::boxed::Box<dyn SpiMaster + Send> {
    fn max_read_len(&self) -> usize {
        (**self).max_read_len()
    }

    fn max_write_len(&self) -> usize {
        (**self).max_write_len()
    }

    fn execute(&mut self, cmd: &mut SpiCommand<'_>) -> Result<()> {
        (**self).execute(cmd)
    }

    fn probe_opcode(&self, opcode: u8) -> bool {
        (**self).probe_opcode(opcode)
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}

//! nrf24prog-dummy - In-memory device emulator for testing
//!
//! This crate provides a dummy programmer that emulates the SPI programming
//! interface of an nRF24LE1 / nRF24LU1+ in memory: MainBlock, InfoPage, the
//! flash status register and the INFEN switch between the two blocks. It can
//! also pose as a plain SPI NOR flash, whose status register bit 3 is a
//! block protect bit, which is what the nRF24 probe must not mistake for
//! InfoPage support.
//!
//! Faults can be injected on the n-th use of an opcode, and every executed
//! opcode is recorded so tests can check which transactions ran.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
mod config;

#[cfg(feature = "std")]
pub use config::DummyError;

#[cfg(feature = "alloc")]
use alloc::vec;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use nrf24prog_core::chip::nrf24::{Fsr, CHIPID_ADDR, CHIPID_LEN};
use nrf24prog_core::error::{Error, Result};
#[cfg(feature = "alloc")]
use nrf24prog_core::programmer::SpiMaster;
use nrf24prog_core::spi::{opcodes, SpiCommand};

/// Emulated device model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DummyChip {
    /// nRF24LE1, 16 KiB MainBlock
    Nrf24le1,
    /// nRF24LU1+, 16 KiB MainBlock
    Nrf24lu1p16k,
    /// nRF24LU1+, 32 KiB MainBlock
    Nrf24lu1p32k,
    /// Generic 64 KiB SPI NOR flash with BP0..BP2 in status register 1
    SpiNor,
}

impl DummyChip {
    /// MainBlock (or flash array) size in bytes
    pub const fn main_size(&self) -> usize {
        match self {
            Self::Nrf24le1 | Self::Nrf24lu1p16k => 16 * 1024,
            Self::Nrf24lu1p32k => 32 * 1024,
            Self::SpiNor => 64 * 1024,
        }
    }

    /// InfoPage size in bytes (zero for SPI NOR)
    pub const fn infopage_size(&self) -> usize {
        match self {
            Self::SpiNor => 0,
            _ => 512,
        }
    }

    /// Returns true for the nRF24 models
    pub const fn is_nrf24(&self) -> bool {
        !matches!(self, Self::SpiNor)
    }

    /// Status bit set by WREN
    const fn write_enable_bit(&self) -> u8 {
        match self {
            Self::SpiNor => 0x02, // WEL
            _ => Fsr::WEN.bits(),
        }
    }

    /// Status bits WRSR can change
    const fn writable_status_bits(&self) -> u8 {
        match self {
            Self::SpiNor => 0xFC, // BP0..BP2, TB, SEC, SRP0
            _ => Fsr::INFEN.bits(),
        }
    }

    /// Status bits that always read as zero
    const fn reserved_status_bits(&self) -> u8 {
        match self {
            Self::SpiNor => opcodes::SR1_WIP,
            _ => 0x01,
        }
    }
}

/// Fail the `nth` (0-based) execution of `opcode` with `SpiTransferFailed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    /// Opcode to fail
    pub opcode: u8,
    /// Which use of the opcode fails
    pub nth: usize,
}

/// Configuration for the dummy device
#[derive(Debug, Clone)]
pub struct DummyConfig {
    /// Emulated model
    pub chip: DummyChip,
    /// Initial status register value
    pub status: u8,
    /// CHIPID stored in the InfoPage at 0x0B..=0x0F
    pub chip_id: [u8; CHIPID_LEN],
    /// Optional injected fault
    pub fault: Option<Fault>,
    /// Opcode the programmer refuses to send
    pub deny: Option<u8>,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            chip: DummyChip::Nrf24le1,
            status: 0,
            chip_id: [0x3A, 0x91, 0x5C, 0x07, 0xE2],
            fault: None,
            deny: None,
        }
    }
}

/// Dummy programmer with an emulated device attached
#[cfg(feature = "alloc")]
pub struct DummyFlash {
    config: DummyConfig,
    main: Vec<u8>,
    infopage: Vec<u8>,
    status: u8,
    fault_hits: usize,
    history: Vec<u8>,
}

#[cfg(feature = "alloc")]
impl DummyFlash {
    /// Create a new dummy device with the given configuration
    ///
    /// The MainBlock starts erased (0xFF). The InfoPage is erased apart from
    /// the CHIPID.
    pub fn new(config: DummyConfig) -> Self {
        let main = vec![0xFF; config.chip.main_size()];
        let mut infopage = vec![0xFF; config.chip.infopage_size()];
        if config.chip.is_nrf24() {
            let start = CHIPID_ADDR as usize;
            infopage[start..start + CHIPID_LEN].copy_from_slice(&config.chip_id);
        }
        let status = config.status & !config.chip.reserved_status_bits();
        Self {
            config,
            main,
            infopage,
            status,
            fault_hits: 0,
            history: Vec::new(),
        }
    }

    /// Create a new dummy nRF24LE1 with default configuration
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Create a dummy device with pre-filled MainBlock contents
    pub fn with_data(config: DummyConfig, initial_data: &[u8]) -> Self {
        let mut flash = Self::new(config);
        let len = core::cmp::min(initial_data.len(), flash.main.len());
        flash.main[..len].copy_from_slice(&initial_data[..len]);
        flash
    }

    /// Get the MainBlock contents
    pub fn data(&self) -> &[u8] {
        &self.main
    }

    /// Get mutable MainBlock contents
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.main
    }

    /// Get the InfoPage contents
    pub fn infopage(&self) -> &[u8] {
        &self.infopage
    }

    /// Get mutable InfoPage contents
    pub fn infopage_mut(&mut self) -> &mut [u8] {
        &mut self.infopage
    }

    /// Current status register value
    pub fn status(&self) -> u8 {
        self.status
    }

    /// Force the status register, bypassing WRSR rules
    pub fn set_status(&mut self, value: u8) {
        self.status = value & !self.config.chip.reserved_status_bits();
    }

    /// Opcodes executed so far, including failed ones
    pub fn history(&self) -> &[u8] {
        &self.history
    }

    /// Number of times `opcode` was executed
    pub fn count(&self, opcode: u8) -> usize {
        self.history.iter().filter(|&&op| op == opcode).count()
    }

    /// Forget the recorded history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Get the configuration
    pub fn config(&self) -> &DummyConfig {
        &self.config
    }

    fn check_fault(&mut self, opcode: u8) -> Result<()> {
        let Some(fault) = self.config.fault else {
            return Ok(());
        };
        if fault.opcode != opcode {
            return Ok(());
        }
        let hit = self.fault_hits;
        self.fault_hits += 1;
        if hit == fault.nth {
            log::debug!("dummy: injected failure on opcode {:#04x}", opcode);
            return Err(Error::SpiTransferFailed);
        }
        Ok(())
    }

    fn handle_read(&mut self, cmd: &mut SpiCommand<'_>) -> Result<()> {
        let addr = cmd.address.unwrap_or(0) as usize;
        let len = cmd.read_buf.len();
        let chip = self.config.chip;
        let fsr = Fsr::from_bits_truncate(self.status);

        let (block, masked) = if chip.is_nrf24() && fsr.contains(Fsr::INFEN) {
            (&self.infopage, fsr.contains(Fsr::RDISIP))
        } else {
            (&self.main, chip.is_nrf24() && fsr.contains(Fsr::RDISMB))
        };

        if addr + len > block.len() {
            return Err(Error::AddressOutOfBounds);
        }

        if masked {
            cmd.read_buf.fill(0x00);
        } else {
            cmd.read_buf.copy_from_slice(&block[addr..addr + len]);
        }
        Ok(())
    }

    fn handle_write_status(&mut self, cmd: &SpiCommand<'_>) {
        let chip = self.config.chip;
        let wel = chip.write_enable_bit();
        if self.status & wel == 0 {
            log::debug!("dummy: WRSR ignored, write enable latch clear");
            return;
        }
        if let Some(&value) = cmd.write_data.first() {
            let mask = chip.writable_status_bits();
            self.status = (self.status & !mask) | (value & mask);
        }
        self.status &= !wel;
    }
}

#[cfg(feature = "alloc")]
impl SpiMaster for DummyFlash {
    fn max_read_len(&self) -> usize {
        4096
    }

    fn max_write_len(&self) -> usize {
        256
    }

    fn execute(&mut self, cmd: &mut SpiCommand<'_>) -> Result<()> {
        self.history.push(cmd.opcode);
        self.check_fault(cmd.opcode)?;
        if !self.probe_opcode(cmd.opcode) {
            return Err(Error::OpcodeNotSupported);
        }

        match cmd.opcode {
            // Status register read
            opcodes::RDSR => {
                if cmd.has_read() {
                    cmd.read_buf[0] = self.status;
                }
                Ok(())
            }

            // Status register write
            opcodes::WRSR => {
                self.handle_write_status(cmd);
                Ok(())
            }

            // Write enable
            opcodes::WREN => {
                self.status |= self.config.chip.write_enable_bit();
                Ok(())
            }

            opcodes::READ => self.handle_read(cmd),

            // Unknown opcode
            _ => Err(Error::OpcodeNotSupported),
        }
    }

    fn probe_opcode(&self, opcode: u8) -> bool {
        self.config.deny != Some(opcode)
            && matches!(
                opcode,
                opcodes::RDSR | opcodes::WRSR | opcodes::WREN | opcodes::READ
            )
    }

    fn delay_us(&mut self, _us: u32) {
        // No delay needed for in-memory operations
    }
}

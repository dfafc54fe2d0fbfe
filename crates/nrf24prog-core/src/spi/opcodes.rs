//! SPI opcodes
//!
//! The nRF24LE1 and nRF24LU1+ flash interface reuses the SPI25 opcodes for
//! its register and read operations. Addresses are two bytes wide.

// ============================================================================
// Write control
// ============================================================================

/// Write Enable - sets WEN in the flash status register
pub const WREN: u8 = 0x06;

// ============================================================================
// Status register operations
// ============================================================================

/// Read Status Register 1 (nRF24: FSR)
pub const RDSR: u8 = 0x05;
/// Write Status Register 1 (nRF24: FSR)
pub const WRSR: u8 = 0x01;

// ============================================================================
// Read
// ============================================================================

/// Read Data
pub const READ: u8 = 0x03;

// ============================================================================
// Status register bit definitions
// ============================================================================

/// Status Register 1: Write In Progress / Busy (reserved and zero on nRF24)
pub const SR1_WIP: u8 = 0x01;

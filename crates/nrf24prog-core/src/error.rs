//! Error types for nrf24prog-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // SPI errors
    /// SPI transfer failed
    SpiTransferFailed,
    /// Opcode is not supported by the programmer or the device
    OpcodeNotSupported,

    // Chip errors
    /// No chip table entry matched the attached device
    ChipNotFound,
    /// Requested chip name is not in the chip table
    UnknownChip,

    // Operation errors
    /// Operation timed out
    Timeout,

    // Address/size errors
    /// Address is beyond the addressed memory block
    AddressOutOfBounds,
    /// Address does not fit into the command's address phase
    AddressTooWide,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpiTransferFailed => write!(f, "SPI transfer failed"),
            Self::OpcodeNotSupported => write!(f, "SPI opcode not supported"),
            Self::ChipNotFound => write!(f, "no supported chip found"),
            Self::UnknownChip => write!(f, "unknown chip name"),
            Self::Timeout => write!(f, "operation timed out"),
            Self::AddressOutOfBounds => write!(f, "address out of bounds"),
            Self::AddressTooWide => write!(f, "address does not fit the address phase"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;

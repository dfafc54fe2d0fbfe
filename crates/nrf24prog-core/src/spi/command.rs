//! SPI command structure

use super::AddressWidth;

/// A single SPI transaction
///
/// Designed to avoid allocation - uses slices for data.
/// The lifetime parameter `'a` ties the command to the buffers it references.
pub struct SpiCommand<'a> {
    /// The opcode byte
    pub opcode: u8,

    /// Address (if any)
    pub address: Option<u32>,

    /// Address width
    pub address_width: AddressWidth,

    /// Data to write after opcode/address
    pub write_data: &'a [u8],

    /// Buffer to read into (mutable)
    pub read_buf: &'a mut [u8],
}

impl<'a> SpiCommand<'a> {
    /// Create a simple command with no address or data (e.g., WREN)
    pub fn simple(opcode: u8) -> Self {
        Self {
            opcode,
            address: None,
            address_width: AddressWidth::None,
            write_data: &[],
            read_buf: &mut [],
        }
    }

    /// Create a read register command with no address (e.g., RDSR)
    pub fn read_reg(opcode: u8, buf: &'a mut [u8]) -> Self {
        Self {
            opcode,
            address: None,
            address_width: AddressWidth::None,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Create a write register command with no address (e.g., WRSR)
    pub fn write_reg(opcode: u8, data: &'a [u8]) -> Self {
        Self {
            opcode,
            address: None,
            address_width: AddressWidth::None,
            write_data: data,
            read_buf: &mut [],
        }
    }

    /// Create a read command with 2-byte address (nRF24 READ)
    pub fn read_2b(opcode: u8, addr: u32, buf: &'a mut [u8]) -> Self {
        Self {
            opcode,
            address: Some(addr),
            address_width: AddressWidth::TwoByte,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Create a read command with 3-byte address (SPI25 READ)
    pub fn read_3b(opcode: u8, addr: u32, buf: &'a mut [u8]) -> Self {
        Self {
            opcode,
            address: Some(addr),
            address_width: AddressWidth::ThreeByte,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Returns true if this command has a read phase
    pub fn has_read(&self) -> bool {
        !self.read_buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spi::opcodes;

    #[test]
    fn test_read_2b() {
        let mut buf = [0u8; 5];
        let cmd = SpiCommand::read_2b(opcodes::READ, 0x0B, &mut buf);
        assert_eq!(cmd.address, Some(0x0B));
        assert_eq!(cmd.address_width, AddressWidth::TwoByte);
        assert!(cmd.has_read());
    }

    #[test]
    fn test_write_reg() {
        let data = [0x08];
        let cmd = SpiCommand::write_reg(opcodes::WRSR, &data);
        assert_eq!(cmd.write_data, [0x08]);
        assert!(!cmd.has_read());
        assert!(cmd.address.is_none());
    }
}

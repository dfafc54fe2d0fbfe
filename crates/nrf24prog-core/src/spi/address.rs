//! Address width types

/// Address width for SPI commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AddressWidth {
    /// No address phase
    #[default]
    None,
    /// 2-byte (16-bit) address - nRF24 flash interface, up to 64 KiB
    TwoByte,
    /// 3-byte (24-bit) address - SPI25 flash, up to 16 MiB
    ThreeByte,
}

impl AddressWidth {
    /// Returns the maximum addressable size in bytes
    pub const fn max_size(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::TwoByte => 64 * 1024,
            Self::ThreeByte => 16 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_size() {
        assert_eq!(AddressWidth::None.max_size(), 0);
        assert_eq!(AddressWidth::TwoByte.max_size(), 0x1_0000);
        assert_eq!(AddressWidth::ThreeByte.max_size(), 0x100_0000);
    }
}

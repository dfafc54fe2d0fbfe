//! Programmer parameter parsing for the dummy device
//!
//! Parameters come from the programmer string, e.g.
//! `dummy:chip=nrf24lu1p,fsr=0x08,fail=wrsr@1`.

use std::collections::HashMap;
use std::string::{String, ToString};

use nrf24prog_core::chip::nrf24::CHIPID_LEN;
use nrf24prog_core::spi::opcodes;

use crate::{DummyChip, DummyConfig, Fault};

/// Errors in dummy programmer parameters
#[derive(Debug, thiserror::Error)]
pub enum DummyError {
    /// Unknown `chip=` value
    #[error("unknown dummy chip '{0}' (expected nrf24le1, nrf24lu1p, nrf24lu1p-32k or spi-nor)")]
    UnknownChip(String),
    /// A value could not be parsed
    #[error("invalid value '{value}' for dummy parameter '{key}'")]
    InvalidValue {
        /// Parameter name
        key: &'static str,
        /// Offending value
        value: String,
    },
    /// Parameter the dummy programmer does not know
    #[error("unknown dummy parameter '{0}'")]
    UnknownParameter(String),
}

impl DummyChip {
    /// Parse a `chip=` value
    pub fn from_name(name: &str) -> Result<Self, DummyError> {
        match name.to_ascii_lowercase().as_str() {
            "nrf24le1" => Ok(Self::Nrf24le1),
            "nrf24lu1p" | "nrf24lu1p-16k" => Ok(Self::Nrf24lu1p16k),
            "nrf24lu1p-32k" => Ok(Self::Nrf24lu1p32k),
            "spi-nor" | "spinor" => Ok(Self::SpiNor),
            _ => Err(DummyError::UnknownChip(name.to_string())),
        }
    }
}

impl DummyConfig {
    /// Build a configuration from `key=value` programmer parameters
    ///
    /// Recognised keys:
    /// - `chip` - device model
    /// - `fsr` - initial status register value
    /// - `chipid` - 10 hex digits stored at InfoPage 0x0B
    /// - `fail` - `<opcode>[@<n>]`, fail the n-th use of an opcode
    /// - `deny` - opcode the programmer refuses to send
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, DummyError> {
        let mut config = Self::default();

        for (key, value) in params {
            match key.as_str() {
                "chip" => config.chip = DummyChip::from_name(value)?,
                "fsr" => config.status = parse_u8("fsr", value)?,
                "chipid" => config.chip_id = parse_chip_id(value)?,
                "fail" => config.fault = Some(parse_fault(value)?),
                "deny" => config.deny = Some(parse_opcode("deny", value)?),
                _ => return Err(DummyError::UnknownParameter(key.clone())),
            }
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: &str) -> DummyError {
    DummyError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn parse_u8(key: &'static str, value: &str) -> Result<u8, DummyError> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse::<u8>(),
    };
    parsed.map_err(|_| invalid(key, value))
}

fn parse_chip_id(value: &str) -> Result<[u8; CHIPID_LEN], DummyError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    if digits.len() != CHIPID_LEN * 2 || !digits.is_ascii() {
        return Err(invalid("chipid", value));
    }

    let mut id = [0u8; CHIPID_LEN];
    for (i, byte) in id.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|_| invalid("chipid", value))?;
    }
    Ok(id)
}

fn parse_opcode(key: &'static str, value: &str) -> Result<u8, DummyError> {
    match value.to_ascii_lowercase().as_str() {
        "rdsr" => Ok(opcodes::RDSR),
        "wrsr" => Ok(opcodes::WRSR),
        "wren" => Ok(opcodes::WREN),
        "read" => Ok(opcodes::READ),
        _ => parse_u8(key, value),
    }
}

fn parse_fault(value: &str) -> Result<Fault, DummyError> {
    let (op, nth) = value.split_once('@').unwrap_or((value, "0"));

    let opcode = parse_opcode("fail", op)?;
    let nth = nth.parse::<usize>().map_err(|_| invalid("fail", value))?;

    Ok(Fault { opcode, nth })
}

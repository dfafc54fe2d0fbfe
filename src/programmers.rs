//! Programmer registration and dispatch
//!
//! This module provides a centralized registry for all programmers, with support
//! for feature-gated inclusion and dynamic help text generation.

use std::collections::HashMap;

use nrf24prog_core::programmer::SpiMaster;

/// Type-erased SPI programmer
pub type BoxedSpiMaster = Box<dyn SpiMaster + Send>;

/// Information about a programmer
pub struct ProgrammerInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available programmers (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_programmers() -> Vec<ProgrammerInfo> {
    let mut programmers = Vec::new();

    #[cfg(feature = "dummy")]
    programmers.push(ProgrammerInfo {
        name: "dummy",
        aliases: &["emulator"],
        description: "In-memory nRF24 emulator (chip=<model>,fsr=<byte>,chipid=<hex>,fail=<op>[@n],deny=<op>)",
    });

    programmers
}

/// Generate a short list of programmer names for CLI help
pub fn programmer_names_short() -> String {
    let programmers = available_programmers();
    let names: Vec<&str> = programmers.iter().map(|p| p.name).collect();
    names.join(", ")
}

/// Parsed programmer parameters
pub struct ProgrammerParams {
    /// Programmer name (canonical)
    pub name: String,
    /// Key-value parameters
    pub params: HashMap<String, String>,
}

/// Parse a programmer string into name and parameters
///
/// Format: "name" or "name:key1=value1,key2=value2"
pub fn parse_programmer_params(s: &str) -> Result<ProgrammerParams, Box<dyn std::error::Error>> {
    let (name, opts_str) = s.split_once(':').unwrap_or((s, ""));

    let mut params = HashMap::new();
    if !opts_str.is_empty() {
        for opt in opts_str.split(',') {
            if let Some((key, value)) = opt.split_once('=') {
                params.insert(key.to_string(), value.to_string());
            } else {
                return Err(
                    format!("Invalid parameter format: '{}' (expected key=value)", opt).into(),
                );
            }
        }
    }

    Ok(ProgrammerParams {
        name: name.to_string(),
        params,
    })
}

/// Open a programmer from its specification string
///
/// # Example
/// ```ignore
/// let mut master = open_programmer("dummy:chip=nrf24lu1p")?;
/// ```
pub fn open_programmer(programmer: &str) -> Result<BoxedSpiMaster, Box<dyn std::error::Error>> {
    let params = parse_programmer_params(programmer)?;

    let canonical = available_programmers()
        .into_iter()
        .find(|p| p.name == params.name || p.aliases.contains(&params.name.as_str()))
        .map(|p| p.name);

    match canonical {
        #[cfg(feature = "dummy")]
        Some("dummy") => open_dummy(&params),
        _ => Err(format!("Unknown programmer: {}", params.name).into()),
    }
}

#[cfg(feature = "dummy")]
fn open_dummy(params: &ProgrammerParams) -> Result<BoxedSpiMaster, Box<dyn std::error::Error>> {
    use nrf24prog_dummy::{DummyConfig, DummyFlash};

    let config = DummyConfig::from_params(&params.params)
        .map_err(|e| format!("Invalid dummy parameters: {}", e))?;
    let flash = DummyFlash::new(config);
    log::info!("Opening dummy programmer ({:?})...", flash.config().chip);

    Ok(Box::new(flash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_programmer_params() {
        let params = parse_programmer_params("dummy:chip=spi-nor,fsr=0x08").unwrap();
        assert_eq!(params.name, "dummy");
        assert_eq!(params.params.get("chip").map(String::as_str), Some("spi-nor"));
        assert_eq!(params.params.get("fsr").map(String::as_str), Some("0x08"));

        let params = parse_programmer_params("dummy").unwrap();
        assert!(params.params.is_empty());

        assert!(parse_programmer_params("dummy:chip").is_err());
    }

    #[test]
    fn test_unknown_programmer() {
        assert!(open_programmer("ch341a").is_err());
    }
}

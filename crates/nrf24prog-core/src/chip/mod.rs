//! Chip table and chip drivers
//!
//! Chips that cannot be identified by JEDEC ID carry their own probe and
//! status printing routines. The table below ties each supported part to
//! them.

pub mod nrf24;

use maybe_async::maybe_async;

use crate::diag::Diagnostics;
use crate::error::{Error, Result};
use crate::programmer::SpiMaster;

/// How a chip is recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    /// InfoPage toggle, see [`nrf24::probe_family`]
    Nrf24,
}

/// How a chip's status register is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPrinter {
    /// FSR decoding, see [`nrf24::decode_and_log_status`]
    Nrf24Fsr,
}

/// One row of the chip table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipEntry {
    /// Vendor name
    pub vendor: &'static str,
    /// Chip name
    pub name: &'static str,
    /// MainBlock size in bytes
    pub total_size: u32,
    /// Program/erase page size in bytes
    pub page_size: u16,
    /// InfoPage size in bytes
    pub infopage_size: u16,
    /// Probe routine
    pub probe: ProbeMethod,
    /// Status register printer
    pub status: StatusPrinter,
}

/// All supported chips
pub static CHIPS: &[ChipEntry] = &[
    ChipEntry {
        vendor: "Nordic",
        name: "nRF24LE1",
        total_size: 16 * 1024,
        page_size: 512,
        infopage_size: 512,
        probe: ProbeMethod::Nrf24,
        status: StatusPrinter::Nrf24Fsr,
    },
    ChipEntry {
        vendor: "Nordic",
        name: "nRF24LU1+ (16K)",
        total_size: 16 * 1024,
        page_size: 512,
        infopage_size: 512,
        probe: ProbeMethod::Nrf24,
        status: StatusPrinter::Nrf24Fsr,
    },
    ChipEntry {
        vendor: "Nordic",
        name: "nRF24LU1+ (32K)",
        total_size: 32 * 1024,
        page_size: 512,
        infopage_size: 512,
        probe: ProbeMethod::Nrf24,
        status: StatusPrinter::Nrf24Fsr,
    },
];

/// Upper bound on chip table entries reported by [`identify`]
pub const MAX_MATCHES: usize = 8;

/// Chip table entries matching a probed device
pub type ChipMatches = heapless::Vec<&'static ChipEntry, MAX_MATCHES>;

/// Look up a chip by name (case-insensitive)
pub fn find_chip(name: &str) -> Option<&'static ChipEntry> {
    CHIPS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Run a single probe routine
#[maybe_async]
pub async fn run_probe<M: SpiMaster + ?Sized>(method: ProbeMethod, master: &mut M) -> bool {
    match method {
        ProbeMethod::Nrf24 => nrf24::probe_family(master).await,
    }
}

/// Report a chip's status register to `diag`
#[maybe_async]
pub async fn print_status<M, D>(chip: &ChipEntry, master: &mut M, diag: &mut D) -> Result<()>
where
    M: SpiMaster + ?Sized,
    D: Diagnostics + ?Sized,
{
    match chip.status {
        StatusPrinter::Nrf24Fsr => nrf24::decode_and_log_status_with(master, diag).await,
    }
}

/// Probe the attached device against the chip table
///
/// With `name` set only that entry is considered. Each probe routine runs at
/// most once, since several entries usually share one. Chips of one family
/// cannot be told apart this way, so every entry whose routine succeeded is
/// returned.
#[maybe_async]
pub async fn identify<M: SpiMaster + ?Sized>(
    master: &mut M,
    name: Option<&str>,
) -> Result<ChipMatches> {
    if let Some(name) = name {
        if find_chip(name).is_none() {
            return Err(Error::UnknownChip);
        }
    }

    let mut tried: heapless::Vec<(ProbeMethod, bool), MAX_MATCHES> = heapless::Vec::new();
    let mut matches = ChipMatches::new();

    for chip in CHIPS {
        if let Some(name) = name {
            if !chip.name.eq_ignore_ascii_case(name) {
                continue;
            }
        }

        let detected = match tried.iter().find(|(m, _)| *m == chip.probe) {
            Some(&(_, detected)) => detected,
            None => {
                log::debug!("Probing for {} {}", chip.vendor, chip.name);
                let detected = run_probe(chip.probe, master).await;
                let pushed = tried.push((chip.probe, detected));
                debug_assert!(pushed.is_ok(), "more than {} probe methods", MAX_MATCHES);
                detected
            }
        };

        if detected {
            log::debug!("Found {} {}", chip.vendor, chip.name);
            let pushed = matches.push(chip);
            debug_assert!(pushed.is_ok(), "more than {} matches", MAX_MATCHES);
        }
    }

    if matches.is_empty() {
        Err(Error::ChipNotFound)
    } else {
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_chip() {
        let chip = find_chip("nrf24le1").unwrap();
        assert_eq!(chip.name, "nRF24LE1");
        assert_eq!(chip.total_size, 16 * 1024);
        assert!(find_chip("nRF24LU1+ (32K)").is_some());
        assert!(find_chip("W25Q128.V").is_none());
    }

    #[test]
    fn test_table_fits_match_list() {
        // identify() keeps one slot per entry and one per distinct probe method
        assert!(CHIPS.len() <= MAX_MATCHES);
        let mut methods: heapless::Vec<ProbeMethod, MAX_MATCHES> = heapless::Vec::new();
        for chip in CHIPS {
            if !methods.contains(&chip.probe) {
                assert!(methods.push(chip.probe).is_ok());
            }
        }
    }

    #[test]
    fn test_table_layout() {
        for (i, chip) in CHIPS.iter().enumerate() {
            assert_eq!(chip.total_size % chip.page_size as u32, 0, "{}", chip.name);
            assert!(chip.total_size <= 64 * 1024, "{}", chip.name);
            assert!(
                CHIPS[i + 1..].iter().all(|c| c.name != chip.name),
                "duplicate entry {}",
                chip.name
            );
        }
    }
}

//! Nordic nRF24LE1 / nRF24LU1+ support
//!
//! These MCUs expose their embedded flash over SPI while PROG is held high.
//! The command set is SPI25-like (WREN, RDSR, WRSR, READ, ...) with 2-byte
//! addresses, and status register 1 is the flash status register (FSR).
//!
//! There is no identification command. [`probe_family`] works around that
//! by switching the InfoPage into the address space and back, comparing the
//! 5 byte CHIPID at 0x0B..=0x0F with whatever the MainBlock holds at the
//! same addresses.
//!
//! Bit 3 of status register 1 is INFEN on these parts, but other SPI flash
//! families use it as a block protect bit. Running the probe against such a
//! chip temporarily rewrites its protection bits, so it should only be
//! attempted for chip table entries that ask for it.

use core::fmt;

use bitflags::bitflags;
use maybe_async::maybe_async;

use crate::diag::{Diagnostics, LogDiagnostics};
use crate::error::{Error, Result};
use crate::programmer::SpiMaster;
use crate::protocol;
use crate::spi::opcodes;

bitflags! {
    /// Flash status register (FSR)
    ///
    /// Bit 0 is reserved.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Fsr: u8 {
        /// Enable HW debugger
        const DBG    = 1 << 7;
        /// Start from protected program memory
        const STP    = 1 << 6;
        /// Flash write (or erase) enable
        const WEN    = 1 << 5;
        /// Flash interface not ready
        const RDYN   = 1 << 4;
        /// InfoPage enable
        const INFEN  = 1 << 3;
        /// SPI read-back disable of MainBlock
        const RDISMB = 1 << 2;
        /// SPI read-back disable of InfoPage
        const RDISIP = 1 << 1;
    }
}

/// Name and description of one FSR flag
#[derive(Debug, Clone, Copy)]
pub struct FsrField {
    /// The flag bit
    pub flag: Fsr,
    /// Datasheet mnemonic
    pub name: &'static str,
    /// Human readable meaning
    pub label: &'static str,
}

/// FSR flags in the order they are reported, most significant bit first
pub const FSR_FIELDS: [FsrField; 7] = [
    FsrField { flag: Fsr::DBG, name: "DBG", label: "Enable HW debugger" },
    FsrField { flag: Fsr::STP, name: "STP", label: "Start from protected program memory" },
    FsrField { flag: Fsr::WEN, name: "WEN", label: "Flash write (or erase) enable" },
    FsrField { flag: Fsr::RDYN, name: "RDYN", label: "Flash interface not ready" },
    FsrField { flag: Fsr::INFEN, name: "INFEN", label: "InfoPage enable" },
    FsrField { flag: Fsr::RDISMB, name: "RDISMB", label: "SPI read-back disable of MainBlock" },
    FsrField { flag: Fsr::RDISIP, name: "RDISIP", label: "SPI read-back disable of InfoPage" },
];

/// First address of the CHIPID in the InfoPage
pub const CHIPID_ADDR: u32 = 0x0B;
/// Length of the CHIPID in bytes
pub const CHIPID_LEN: usize = 5;

/// Write one line per FSR flag to `diag`
pub fn log_fsr<D: Diagnostics + ?Sized>(raw: u8, diag: &mut D) {
    let fsr = Fsr::from_bits_truncate(raw);
    for field in &FSR_FIELDS {
        diag.debug(format_args!(
            "Chip status register: {} ({}) is {}set",
            field.label,
            field.name,
            if fsr.contains(field.flag) { "" } else { "not " }
        ));
    }
}

/// Read the FSR and report every flag to `diag`
///
/// Nothing is reported if the register read fails.
#[maybe_async]
pub async fn decode_and_log_status_with<M, D>(master: &mut M, diag: &mut D) -> Result<()>
where
    M: SpiMaster + ?Sized,
    D: Diagnostics + ?Sized,
{
    let raw = protocol::read_status1(master).await?;
    log_fsr(raw, diag);
    Ok(())
}

/// Read the FSR and report every flag through `log::debug!`
#[maybe_async]
pub async fn decode_and_log_status<M: SpiMaster + ?Sized>(master: &mut M) -> Result<()> {
    decode_and_log_status_with(master, &mut LogDiagnostics).await
}

/// Step of the family probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStep {
    /// Reading the original FSR
    ReadStatus,
    /// Setting INFEN
    EnterInfoPage,
    /// Reading the CHIPID with INFEN set
    ReadChipId,
    /// Clearing INFEN
    LeaveInfoPage,
    /// Reading the same addresses from the MainBlock
    ReadProgram,
}

impl ProbeStep {
    fn failed(self, error: Error) -> ProbeFailure {
        ProbeFailure { step: self, error }
    }
}

impl fmt::Display for ProbeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadStatus => write!(f, "reading FSR"),
            Self::EnterInfoPage => write!(f, "enabling InfoPage"),
            Self::ReadChipId => write!(f, "reading CHIPID"),
            Self::LeaveInfoPage => write!(f, "disabling InfoPage"),
            Self::ReadProgram => write!(f, "reading MainBlock"),
        }
    }
}

/// Bus error that stopped the family probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeFailure {
    /// Step that failed
    pub step: ProbeStep,
    /// Error reported by the programmer
    pub error: Error,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.step, self.error)
    }
}

/// Result of the family probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// CHIPID and MainBlock contents differ
    Detected,
    /// Toggling INFEN had no visible effect
    NotDetected,
    /// The probe could not complete
    Inconclusive(ProbeFailure),
}

impl ProbeOutcome {
    /// Collapse to a yes/no answer; an inconclusive probe counts as "no"
    pub fn is_detected(&self) -> bool {
        matches!(self, Self::Detected)
    }
}

/// FSR value before the probe touched it, and whether INFEN may differ now
struct InfoPageSession {
    original: u8,
    dirty: bool,
}

impl InfoPageSession {
    fn new(original: u8) -> Self {
        Self {
            original,
            dirty: false,
        }
    }

    fn with_infen(&self, enable: bool) -> u8 {
        if enable {
            self.original | Fsr::INFEN.bits()
        } else {
            self.original & !Fsr::INFEN.bits()
        }
    }
}

#[maybe_async]
async fn switch_infopage<M: SpiMaster + ?Sized>(
    master: &mut M,
    session: &mut InfoPageSession,
    enable: bool,
) -> Result<()> {
    let value = session.with_infen(enable);
    // A failed write leaves INFEN in an unknown state
    session.dirty = true;
    protocol::write_status1(master, value).await?;
    session.dirty = value & Fsr::INFEN.bits() != session.original & Fsr::INFEN.bits();
    Ok(())
}

#[maybe_async]
async fn restore_fsr<M: SpiMaster + ?Sized>(master: &mut M, session: InfoPageSession) {
    if !session.dirty {
        return;
    }
    match protocol::write_status1(master, session.original).await {
        Ok(()) => log::debug!("nRF24 probe: FSR restored to {:#04x}", session.original),
        Err(e) => log::warn!(
            "nRF24 probe: failed to restore FSR to {:#04x}: {}",
            session.original,
            e
        ),
    }
}

/// Fail early if the programmer refuses an opcode the probe relies on
fn check_opcodes<M: SpiMaster + ?Sized>(master: &M) -> core::result::Result<(), ProbeFailure> {
    let needed = [
        (opcodes::WREN, ProbeStep::EnterInfoPage),
        (opcodes::WRSR, ProbeStep::EnterInfoPage),
        (opcodes::READ, ProbeStep::ReadChipId),
    ];
    match needed.iter().find(|(opcode, _)| !master.probe_opcode(*opcode)) {
        Some(&(_, step)) => Err(step.failed(Error::OpcodeNotSupported)),
        None => Ok(()),
    }
}

#[maybe_async]
async fn compare_chipid<M: SpiMaster + ?Sized>(
    master: &mut M,
    session: &mut InfoPageSession,
) -> core::result::Result<bool, ProbeFailure> {
    switch_infopage(master, session, true)
        .await
        .map_err(|e| ProbeStep::EnterInfoPage.failed(e))?;
    let mut id = [0u8; CHIPID_LEN];
    protocol::read_2b(master, CHIPID_ADDR, &mut id)
        .await
        .map_err(|e| ProbeStep::ReadChipId.failed(e))?;

    switch_infopage(master, session, false)
        .await
        .map_err(|e| ProbeStep::LeaveInfoPage.failed(e))?;
    let mut pgm = [0u8; CHIPID_LEN];
    protocol::read_2b(master, CHIPID_ADDR, &mut pgm)
        .await
        .map_err(|e| ProbeStep::ReadProgram.failed(e))?;

    log::debug!("nRF24 probe: CHIPID {:02x?}, MainBlock {:02x?}", id, pgm);

    // CHIPID is unlikely to collide with program memory
    Ok(id != pgm)
}

/// Detect an nRF24 MCU by toggling the InfoPage
///
/// Once INFEN has been touched, the original FSR value is written back on
/// every exit path. A failed restore is logged and does not change the
/// outcome. Nothing is written when the programmer cannot send WREN, WRSR
/// and READ.
#[maybe_async]
pub async fn probe_family_detailed<M: SpiMaster + ?Sized>(master: &mut M) -> ProbeOutcome {
    let original = match protocol::read_status1(master).await {
        Ok(value) => value,
        Err(e) => {
            log::debug!("nRF24 probe: {}", ProbeStep::ReadStatus.failed(e));
            return ProbeOutcome::Inconclusive(ProbeStep::ReadStatus.failed(e));
        }
    };

    if let Err(failure) = check_opcodes(master) {
        log::debug!("nRF24 probe: {}", failure);
        return ProbeOutcome::Inconclusive(failure);
    }

    let mut session = InfoPageSession::new(original);
    let outcome = match compare_chipid(master, &mut session).await {
        Ok(true) => ProbeOutcome::Detected,
        Ok(false) => ProbeOutcome::NotDetected,
        Err(failure) => {
            log::debug!("nRF24 probe: {}", failure);
            ProbeOutcome::Inconclusive(failure)
        }
    };
    restore_fsr(master, session).await;

    outcome
}

/// Detect an nRF24 MCU; any bus failure counts as "not detected"
#[maybe_async]
pub async fn probe_family<M: SpiMaster + ?Sized>(master: &mut M) -> bool {
    probe_family_detailed(master).await.is_detected()
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::{String, Vec};

    type Lines = Vec<String<96>, 8>;

    struct Collect(Lines);

    impl Diagnostics for Collect {
        fn debug(&mut self, args: fmt::Arguments<'_>) {
            let mut line = String::new();
            fmt::write(&mut line, args).unwrap();
            self.0.push(line).unwrap();
        }
    }

    fn lines_for(raw: u8) -> Lines {
        let mut diag = Collect(Vec::new());
        log_fsr(raw, &mut diag);
        diag.0
    }

    #[test]
    fn test_log_fsr_all_values() {
        for raw in 0..=u8::MAX {
            let lines = lines_for(raw);
            assert_eq!(lines.len(), 7);
            for (i, line) in lines.iter().enumerate() {
                let bit = 7 - i;
                let field = &FSR_FIELDS[i];
                assert_eq!(field.flag.bits(), 1 << bit);
                assert!(line.contains(field.name));
                if raw & (1 << bit) != 0 {
                    assert!(line.ends_with(" is set"), "{}", line);
                } else {
                    assert!(line.ends_with(" is not set"), "{}", line);
                }
            }
        }
    }

    #[test]
    fn test_log_fsr_all_clear() {
        let lines = lines_for(0x00);
        assert_eq!(
            lines[0].as_str(),
            "Chip status register: Enable HW debugger (DBG) is not set"
        );
        assert_eq!(
            lines[6].as_str(),
            "Chip status register: SPI read-back disable of InfoPage (RDISIP) is not set"
        );
        assert!(lines.iter().all(|l| l.ends_with("is not set")));
    }

    #[test]
    fn test_log_fsr_all_set() {
        // Bit 0 is reserved and must not change anything
        assert_eq!(lines_for(0xFF), lines_for(0xFE));
        let lines = lines_for(0xFF);
        assert_eq!(
            lines[4].as_str(),
            "Chip status register: InfoPage enable (INFEN) is set"
        );
        assert!(lines.iter().all(|l| l.ends_with(" is set")));
    }

    #[test]
    fn test_session_infen_value() {
        let session = InfoPageSession::new(0xA4);
        assert_eq!(session.with_infen(true), 0xAC);
        assert_eq!(session.with_infen(false), 0xA4);

        let session = InfoPageSession::new(0x08);
        assert_eq!(session.with_infen(true), 0x08);
        assert_eq!(session.with_infen(false), 0x00);
    }

    #[test]
    fn test_outcome_collapse() {
        assert!(ProbeOutcome::Detected.is_detected());
        assert!(!ProbeOutcome::NotDetected.is_detected());
        let failure = ProbeStep::ReadChipId.failed(Error::SpiTransferFailed);
        assert!(!ProbeOutcome::Inconclusive(failure).is_detected());
    }
}

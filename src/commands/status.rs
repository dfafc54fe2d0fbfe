//! Status command implementation

use nrf24prog_core::chip;
use nrf24prog_core::error::Error;
use nrf24prog_core::programmer::SpiMaster;

/// Identify the chip and print its decoded status register
pub fn run_status<M: SpiMaster + ?Sized>(
    master: &mut M,
    chip_name: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let matches = chip::identify(master, chip_name).map_err(|e| {
        eprintln!("Probe failed: {}", e);
        e
    })?;
    let entry = matches.first().copied().ok_or(Error::ChipNotFound)?;

    let mut lines: Vec<String> = Vec::new();
    if let Err(e) = chip::print_status(entry, master, &mut lines) {
        eprintln!("Failed to read status register: {}", e);
        return Err(Box::new(e));
    }

    println!("{} {}:", entry.vendor, entry.name);
    for line in &lines {
        println!("  {}", line);
    }
    Ok(())
}

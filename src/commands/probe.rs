//! Probe command implementation

use nrf24prog_core::chip;
use nrf24prog_core::programmer::SpiMaster;

/// Probe the chip table and print what matched
pub fn run_probe<M: SpiMaster + ?Sized>(
    master: &mut M,
    chip_name: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    match chip::identify(master, chip_name) {
        Ok(matches) => {
            if let [only] = matches.as_slice() {
                println!("Found flash chip:");
                println!("  Vendor:   {}", only.vendor);
                println!("  Name:     {}", only.name);
                println!(
                    "  Size:     {} bytes ({} KiB)",
                    only.total_size,
                    only.total_size / 1024
                );
                println!("  InfoPage: {} bytes", only.infopage_size);
            } else {
                println!("Found nRF24 family device, matching chip definitions:");
                for c in matches.iter() {
                    println!("  {} {} ({} KiB)", c.vendor, c.name, c.total_size / 1024);
                }
                println!("Use --chip to select one.");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Probe failed: {}", e);
            Err(Box::new(e))
        }
    }
}

//! List commands implementation

use crate::programmers;
use nrf24prog_core::chip;

/// List all available programmers
pub fn list_programmers() {
    println!("Available programmers:");
    println!();
    for p in programmers::available_programmers() {
        println!("  {:10} - {}", p.name, p.description);
    }
}

/// List all supported chips
pub fn list_chips() {
    println!("Supported chips:");
    println!();
    println!(
        "{:<8} {:<18} {:>8} {:>6} {:>9}",
        "Vendor", "Name", "Size", "Page", "InfoPage"
    );
    println!("{}", "-".repeat(53));

    for chip in chip::CHIPS {
        println!(
            "{:<8} {:<18} {:>8} {:>6} {:>9}",
            chip.vendor,
            chip.name,
            format_size(chip.total_size),
            chip.page_size,
            chip.infopage_size
        );
    }
}

fn format_size(bytes: u32) -> String {
    if bytes >= 1024 * 1024 {
        format!("{} MiB", bytes / (1024 * 1024))
    } else if bytes >= 1024 {
        format!("{} KiB", bytes / 1024)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(16 * 1024), "16 KiB");
        assert_eq!(format_size(2 * 1024 * 1024), "2 MiB");
    }
}

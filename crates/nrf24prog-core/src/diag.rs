//! Diagnostic output sinks
//!
//! Chip drivers that print human readable diagnostics (status register
//! dumps and the like) take a [`Diagnostics`] sink instead of writing to the
//! logger directly, so callers can route the lines wherever they want.

use core::fmt;

/// Receiver for debug-level diagnostic lines
pub trait Diagnostics {
    /// Emit one diagnostic line
    fn debug(&mut self, args: fmt::Arguments<'_>);
}

/// Forwards every line to `log::debug!`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn debug(&mut self, args: fmt::Arguments<'_>) {
        log::debug!("{}", args);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn debug(&mut self, args: fmt::Arguments<'_>) {
        (**self).debug(args)
    }
}

/// Collects lines in memory
#[cfg(feature = "alloc")]
impl Diagnostics for alloc::vec::Vec<alloc::string::String> {
    fn debug(&mut self, args: fmt::Arguments<'_>) {
        self.push(alloc::fmt::format(args));
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn test_vec_collects_lines() {
        let mut lines: Vec<String> = Vec::new();
        lines.debug(format_args!("value is {:#04x}", 0x2a));
        (&mut lines).debug(format_args!("second"));
        assert_eq!(lines, ["value is 0x2a", "second"]);
    }
}

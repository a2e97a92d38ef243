use std::cell::Cell;
use std::fmt;

use regfield::{AddressRange, Register, RegisterShape};

use crate::error::Result;
use crate::layouts::{DemoBlock, DemoRegister, Status, TestRange1, TestRange2};

/// Outcome of the demo run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoReport {
    pub base: u64,
    pub address: u64,
    pub raw: u32,
    pub status: bool,
    pub range1: u32,
    pub range2: u32,
}

/// Program the demo register through a simulated bus and read it back
///
/// The "hardware" is a single cell; the register writes to it and the report
/// is decoded from a fresh read, so the values shown are the ones that made
/// the round trip.
pub fn run() -> Result<DemoReport> {
    let bus = Cell::new(0u32);
    let mut register = Register::<DemoRegister, _, _>::new(|| bus.get(), |raw| bus.set(raw));

    register
        .set::<Status>(true)?
        .set::<TestRange1>(29)?
        .set::<TestRange2>(6645)?;
    register.write();

    tracing::info!("Wrote {:#x} to the demo register", bus.get());

    *register.raw_mut() = 0;
    register.read();

    Ok(DemoReport {
        base: DemoBlock::BEGIN,
        address: DemoRegister::ADDRESS,
        raw: register.raw(),
        status: register.get::<Status>(),
        range1: register.get::<TestRange1>(),
        range2: register.get::<TestRange2>(),
    })
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Register at {:#x} (base {:#x}, location {:?})",
            self.address,
            self.base,
            DemoRegister::LOCATION
        )?;
        writeln!(f, "Raw value = {:032b}", self.raw)?;
        writeln!(f, "Status = {}", self.status)?;
        writeln!(f, "Range 1 = {}", self.range1)?;
        write!(f, "Range 2 = {}", self.range2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_run() {
        let report = run().unwrap();

        assert_eq!(report.base, 0);
        assert_eq!(report.address, 5);
        assert!(report.status);
        assert_eq!(report.range1, 29);
        assert_eq!(report.range2, 6645);
        assert_eq!(report.raw, 1 | (29 << 1) | (6645 << 7));
    }

    #[test]
    fn test_demo_display() {
        let text = run().unwrap().to_string();
        assert!(text.contains("Raw value = 00000000000011001111101010111011"));
        assert!(text.contains("Status = true"));
        assert!(text.contains("Range 1 = 29"));
        assert!(text.contains("Range 2 = 6645"));
    }
}

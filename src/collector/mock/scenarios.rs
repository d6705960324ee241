//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` filesystem states
//! for testing various system conditions.

use super::filesystem::MockFs;

impl MockFs {
    /// Creates a typical two-CPU x86 system.
    ///
    /// Includes numbered IO-APIC lines, named architecture counters and
    /// the `ERR`/`MIS` single-value rows.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/sys/kernel/hostname", "db-primary-01\n");
        fs.add_file(
            "/proc/interrupts",
            "\
           CPU0       CPU1
  0:         46          0   IO-APIC   2-edge      timer
  1:          0          9   IO-APIC   1-edge      i8042
  8:          0          0   IO-APIC   8-edge      rtc0
  9:          0          0   IO-APIC   9-fasteoi   acpi
 24:     112233      44556   PCI-MSI 512000-edge      ahci[0000:00:1f.2]
 25:       7001       6999   PCI-MSI 327680-edge      xhci_hcd
NMI:          3          4   Non-maskable interrupts
LOC:    9876543    8765432   Local timer interrupts
RES:      12345      23456   Rescheduling interrupts
ERR:          0
MIS:          0
",
        );

        fs
    }

    /// Creates the minimal table with one header and two records.
    pub fn minimal_system() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/proc/interrupts",
            "\
           CPU0       CPU1
  0:        100         50   IO-APIC-edge      timer
  1:         10          5   IO-APIC-edge      i8042
",
        );

        fs
    }

    /// Creates a table containing malformed rows next to valid ones.
    ///
    /// Valid rows: `x0` (stops at `foo`), `x1` (hex and octal fields),
    /// `x2` (trailing garbage on a count).
    pub fn malformed_interrupts() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/proc/interrupts",
            "\
cpu0 cpu1

lonely:
nocolon 1 2
 x0: 5 foo 7
 x1: 0x10 010 1
 x2: 12abc 3
:  4 4
",
        );

        fs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::traits::FileSystem;
    use std::path::Path;

    #[test]
    fn test_typical_system_has_interrupts() {
        let fs = MockFs::typical_system();
        assert!(fs.exists(Path::new("/proc/interrupts")));
        assert!(fs.exists(Path::new("/proc/sys/kernel/hostname")));
    }

    #[test]
    fn test_minimal_system_has_no_hostname() {
        let fs = MockFs::minimal_system();
        assert!(fs.exists(Path::new("/proc/interrupts")));
        assert!(!fs.exists(Path::new("/proc/sys/kernel/hostname")));
    }
}

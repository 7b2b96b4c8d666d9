//! Low-level target helpers.
//!
//! Wraps the MIPS CP0 accesses the crate needs so everything above this module
//! stays target independent. On non-MIPS targets only the portable pieces are
//! available.

#[cfg(all(target_arch = "mips", target_os = "none"))]
mod inner {
    use core::arch::asm;

    /// Reads the CP0 Count register.
    #[inline]
    pub fn read_count() -> u32 {
        let value: u32;
        unsafe { asm!("mfc0 {0}, $9", out(reg) value, options(nomem, nostack)) };
        value
    }

    /// Writes the CP0 Count register.
    #[inline]
    pub fn write_count(value: u32) {
        unsafe { asm!("mtc0 {0}, $9", in(reg) value, options(nostack)) };
    }

    /// Disables interrupts, returning whether they were enabled before.
    #[inline]
    pub fn interrupt_disable() -> bool {
        let status: u32;
        // `di` writes the prior CP0 Status value to its operand (MIPS32r2).
        unsafe { asm!("di {0}", out(reg) status, options(nostack)) };
        status & 1 != 0
    }

    /// Enables interrupts.
    #[inline]
    pub fn interrupt_enable() {
        unsafe { asm!("ei", options(nostack)) };
    }
}

#[cfg(all(target_arch = "mips", target_os = "none"))]
pub use inner::*;

/// Spin-loop hint, used by the calibrated busy-wait delay.
#[inline]
pub fn nop() {
    core::hint::spin_loop();
}

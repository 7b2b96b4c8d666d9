//! Critical section for the single-core PIC32MX.
//!
//! Masks interrupts through the CP0 Status IE bit for the duration of the
//! section and restores the previous state on release.

use crate::arch;

struct SingleCoreCs;
critical_section::set_impl!(SingleCoreCs);

unsafe impl critical_section::Impl for SingleCoreCs {
    unsafe fn acquire() -> critical_section::RawRestoreState {
        arch::interrupt_disable() as u8
    }

    unsafe fn release(was_enabled: critical_section::RawRestoreState) {
        if was_enabled != 0 {
            arch::interrupt_enable();
        }
    }
}

//! Access to the free-running count register.
//!
//! The [`CountRegister`] trait is the boundary between the tick arithmetic in
//! [`tick`](crate::tick) and the hardware. The register is process-wide state
//! with no lifecycle beyond power-on; the trait only observes and overwrites
//! it. Keeping the boundary a plain read/write pair means the wraparound
//! arithmetic can be exercised against a simulated counter on the host.

/// Raw access to a free-running 32-bit counter.
///
/// Implemented by `CoreCount` for the real CP0 Count register. Applications
/// and tests can implement it for simulated counters.
pub trait CountRegister {
    /// Returns the current raw counter value.
    fn read(&self) -> u32;

    /// Overwrites the raw counter value.
    fn write(&mut self, value: u32);
}

#[cfg(all(target_arch = "mips", target_os = "none"))]
mod hw {
    use core::sync::atomic::{AtomicBool, Ordering};

    use super::CountRegister;
    use crate::arch;

    static TAKEN: AtomicBool = AtomicBool::new(false);

    /// The CP0 Count register of the executing core.
    ///
    /// Increments once for every two SYSCLK cycles and wraps from `u32::MAX`
    /// to zero; the wrap is expected and handled by the arithmetic in
    /// [`Ticker`](crate::tick::Ticker), not an error.
    pub struct CoreCount {
        _private: (),
    }

    impl CoreCount {
        /// Takes the count register. Will only return a value the first time
        /// this is called.
        pub fn take() -> Option<Self> {
            critical_section::with(|_| {
                if TAKEN.load(Ordering::Relaxed) {
                    None
                } else {
                    TAKEN.store(true, Ordering::Relaxed);
                    Some(CoreCount { _private: () })
                }
            })
        }

        /// Creates a handle without checking whether one is already live.
        ///
        /// # Safety
        ///
        /// Two handles writing the counter invalidate each other's stamps and
        /// delays. The caller must guarantee exclusive use of the register.
        pub unsafe fn steal() -> Self {
            CoreCount { _private: () }
        }
    }

    impl CountRegister for CoreCount {
        fn read(&self) -> u32 {
            arch::read_count()
        }

        fn write(&mut self, value: u32) {
            arch::write_count(value)
        }
    }
}

#[cfg(all(target_arch = "mips", target_os = "none"))]
pub use hw::CoreCount;

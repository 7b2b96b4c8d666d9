//! Helpers that stay off the core timer.

use embedded_hal::delay::DelayNs;
use fugit::HertzU32;

use crate::arch;

/// Assumed cost of one spin-loop iteration in clock cycles.
pub const CYCLES_PER_LOOP: u32 = 4;

/// Calibrated busy-wait delay that never touches the core timer.
///
/// [`Ticker::delay_ticks`](crate::tick::Ticker::delay_ticks) resets the shared
/// counter; this delay just burns cycles, so it can run while stamp-based
/// measurements are in flight. Accuracy is rough: each spin iteration is
/// assumed to cost [`CYCLES_PER_LOOP`] clock cycles, which only holds
/// approximately across compiler versions and flash wait states.
pub struct SpinDelay {
    cycles_per_us: u32,
}

impl SpinDelay {
    /// Calibrates for a system running at `sysclk`.
    pub fn new(sysclk: HertzU32) -> Self {
        Self {
            cycles_per_us: sysclk.to_Hz() / 1_000_000,
        }
    }

    fn loops_for_ns(&self, ns: u32) -> u64 {
        u64::from(ns) * u64::from(self.cycles_per_us) / (1_000 * u64::from(CYCLES_PER_LOOP))
    }
}

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        for _ in 0..self.loops_for_ns(ns) {
            arch::nop();
        }
    }
}

#[cfg(test)]
mod tests {
    use fugit::RateExtU32;

    use super::*;

    #[test]
    fn calibration_follows_the_clock_rate() {
        assert_eq!(SpinDelay::new(80.MHz()).cycles_per_us, 80);
        assert_eq!(SpinDelay::new(40.MHz()).cycles_per_us, 40);
    }

    #[test]
    fn loop_count_scales_with_the_request() {
        let d = SpinDelay::new(80.MHz());
        assert_eq!(d.loops_for_ns(1_000), 20);
        assert_eq!(d.loops_for_ns(10_000), 200);
        let d = SpinDelay::new(40.MHz());
        assert_eq!(d.loops_for_ns(1_000_000), 10_000);
    }
}

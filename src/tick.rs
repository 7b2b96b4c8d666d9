//! Tick readout, elapsed-time arithmetic and blocking delays.
//!
//! The count register increments once for every two SYSCLK cycles, so the
//! public tick unit is one SYSCLK cycle: readings are twice the raw register
//! value and the tick rate equals the system clock rate. Stamps live in a
//! 32-bit tick space that wraps every `2^32` ticks, about 107 s at 40 MHz and
//! 53 s at 80 MHz. [`Ticker::elapsed_since`] handles exactly one wrap of that
//! space; intervals longer than one wrap period are a caller contract
//! violation and come back short.
//!
//! [`Ticker::delay_ticks`] resets the shared counter as a side effect and must
//! not run while other code measures elapsed time through stamps. Use
//! [`CountDown`] where a delay has to coexist with stamp-based polling, or
//! [`SpinDelay`](crate::util::SpinDelay) to stay off the counter entirely.

use fugit::HertzU32;

use crate::count::CountRegister;

/// Scaling between the raw register and the public tick unit: the counter
/// increments once per two SYSCLK cycles.
const TICKS_PER_COUNT: u32 = 2;

/// A snapshot of the 32-bit tick space, the reference point for
/// [`Ticker::elapsed_since`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickStamp(u32);

impl TickStamp {
    /// Creates a stamp from a raw tick-space position.
    pub const fn from_ticks(ticks: u32) -> Self {
        TickStamp(ticks)
    }

    /// Returns the position in tick space.
    pub const fn ticks(self) -> u32 {
        self.0
    }
}

/// Tick counter over a free-running 32-bit count register.
pub struct Ticker<C: CountRegister> {
    count: C,
    sysclk: HertzU32,
}

impl<C: CountRegister> Ticker<C> {
    /// Wraps a count register.
    ///
    /// `sysclk` is the system clock rate driving the register, normally taken
    /// from the [`Board`](crate::board::Board) in use.
    pub fn new(count: C, sysclk: HertzU32) -> Self {
        Self { count, sysclk }
    }

    /// Releases the underlying count register.
    pub fn free(self) -> C {
        self.count
    }

    /// Ticks per second. Equal to the SYSCLK rate.
    pub fn tick_rate(&self) -> HertzU32 {
        self.sysclk
    }

    /// Current reading in ticks: twice the raw register value.
    ///
    /// Never blocks. The full range is `0..2 * 2^32`; for wraparound-safe
    /// interval measurement take a [`stamp`](Self::stamp) instead.
    pub fn now(&self) -> u64 {
        u64::from(self.count.read()) * u64::from(TICKS_PER_COUNT)
    }

    /// Current position in the 32-bit tick space.
    pub fn stamp(&self) -> TickStamp {
        TickStamp(self.count.read().wrapping_mul(TICKS_PER_COUNT))
    }

    /// Ticks elapsed since `stamp` was taken.
    ///
    /// Handles exactly one wraparound of the tick space: the result is
    /// `now - stamp` when no wrap occurred, and `2^32 + now - stamp` after
    /// one. If more than `2^32` ticks pass between the stamp and the query
    /// the result comes back short; callers must keep measurement intervals
    /// below one wrap period. A [`reset`](Self::reset) between the stamp and
    /// the query invalidates the stamp the same way.
    pub fn elapsed_since(&self, stamp: TickStamp) -> u64 {
        let current = self.count.read().wrapping_mul(TICKS_PER_COUNT);
        u64::from(current.wrapping_sub(stamp.ticks()))
    }

    /// Resets the counter to zero.
    ///
    /// Stamps taken before the reset no longer measure real elapsed time.
    pub fn reset(&mut self) {
        self.count.write(0);
    }

    /// Busy-waits until at least `ticks` ticks have elapsed.
    ///
    /// Resets the counter and then polls it, so it must not run concurrently
    /// with stamp-based measurement on the same counter. Spins without
    /// yielding; there is no timeout and no cancellation. `ticks` must stay
    /// below one raw wrap period (`2^33` ticks).
    pub fn delay_ticks(&mut self, ticks: u64) {
        #[cfg(feature = "defmt")]
        defmt::trace!("delay {=u64} ticks", ticks);
        self.reset();
        while self.now() < ticks {}
    }

    /// Initializes a [`CountDown`] over this ticker without starting it.
    ///
    /// Unlike [`delay_ticks`](Self::delay_ticks) a count-down never resets
    /// the counter, so it can run alongside stamp-based measurement.
    pub fn count_down(&self) -> CountDown<'_, C> {
        CountDown {
            ticker: self,
            period: 0,
            start: None,
        }
    }

    fn ticks_for_us(&self, us: u32) -> u64 {
        u64::from(us) * u64::from(self.sysclk.to_Hz()) / 1_000_000
    }
}

impl<C: CountRegister> embedded_hal::delay::DelayNs for Ticker<C> {
    fn delay_ns(&mut self, ns: u32) {
        // Round up so short non-zero requests still wait a full tick.
        let ticks = (u64::from(ns) * u64::from(self.sysclk.to_Hz())).div_ceil(1_000_000_000);
        self.delay_ticks(ticks);
    }

    fn delay_us(&mut self, us: u32) {
        // Delay in 1 ms chunks to keep each spin well below the wrap period.
        for _ in 0..us / 1000 {
            let ticks = self.ticks_for_us(1000);
            self.delay_ticks(ticks);
        }
        let rem = us % 1000;
        if rem > 0 {
            let ticks = self.ticks_for_us(rem);
            self.delay_ticks(ticks);
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            let ticks = self.ticks_for_us(1000);
            self.delay_ticks(ticks);
        }
    }
}

macro_rules! impl_delay_traits {
    ($($t:ty),+) => {
        $(
        impl<C: CountRegister> embedded_hal_0_2::blocking::delay::DelayUs<$t> for Ticker<C> {
            fn delay_us(&mut self, us: $t) {
                #![allow(unused_comparisons)]
                assert!(us >= 0); // Only meaningful for i32
                embedded_hal::delay::DelayNs::delay_us(self, us as u32)
            }
        }
        impl<C: CountRegister> embedded_hal_0_2::blocking::delay::DelayMs<$t> for Ticker<C> {
            fn delay_ms(&mut self, ms: $t) {
                #![allow(unused_comparisons)]
                assert!(ms >= 0); // Only meaningful for i32
                embedded_hal::delay::DelayNs::delay_ms(self, ms as u32)
            }
        }
        )*
    }
}

// The implementation for i32 is a workaround to allow `delay_ms(42)` construction without specifying a type.
impl_delay_traits!(u8, u16, u32, i32);

/// Count-down built on tick stamps.
///
/// Driven through the [`embedded_hal_0_2::timer`] traits. Periodic: a
/// completed wait re-arms the next period from the previous deadline. The
/// period must stay below one tick-space wrap (`2^32` ticks).
pub struct CountDown<'ticker, C: CountRegister> {
    ticker: &'ticker Ticker<C>,
    period: u32,
    start: Option<TickStamp>,
}

impl<C: CountRegister> embedded_hal_0_2::timer::CountDown for CountDown<'_, C> {
    type Time = u32;

    fn start<T>(&mut self, count: T)
    where
        T: Into<Self::Time>,
    {
        self.period = count.into();
        self.start = Some(self.ticker.stamp());
    }

    fn wait(&mut self) -> nb::Result<(), void::Void> {
        if let Some(start) = self.start {
            if self.ticker.elapsed_since(start) >= u64::from(self.period) {
                self.start = Some(TickStamp::from_ticks(
                    start.ticks().wrapping_add(self.period),
                ));
                Ok(())
            } else {
                Err(nb::Error::WouldBlock)
            }
        } else {
            panic!("CountDown is not running!");
        }
    }
}

impl<C: CountRegister> embedded_hal_0_2::timer::Periodic for CountDown<'_, C> {}

impl<C: CountRegister> embedded_hal_0_2::timer::Cancel for CountDown<'_, C> {
    type Error = &'static str;

    fn cancel(&mut self) -> Result<(), Self::Error> {
        if self.start.is_none() {
            Err("CountDown is not running.")
        } else {
            self.start = None;
            Ok(())
        }
    }
}

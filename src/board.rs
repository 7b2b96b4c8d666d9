//! Board bring-up collaborators.
//!
//! The tick core only needs to know the system clock rate driving the count
//! register. Pin multiplexing and clock register programming differ per board
//! and belong to the application (or a board support crate); [`Board`] keeps
//! that step behind a swappable seam invoked once at startup, out of the
//! timing core.

use fugit::{HertzU32, RateExtU32};

/// A target board.
pub trait Board {
    /// System clock rate after bring-up. The core timer ticks at half this
    /// rate; the public tick unit runs at exactly this rate.
    fn sysclk(&self) -> HertzU32;

    /// One-time pin and clock configuration, called once at startup.
    fn bring_up(&mut self) {}
}

/// Microchip Explorer 16/32 with a PIC32MX795F512L PIM.
///
/// SYSCLK = PBCLK = 80 MHz from the 8 MHz crystal through the PLL.
#[derive(Debug, Default, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Explorer1632;

impl Board for Explorer1632 {
    fn sysclk(&self) -> HertzU32 {
        80.MHz()
    }
}

/// Digilent Basys MX3.
///
/// Run at 40 MHz so its timing matches the Microstick II setup.
#[derive(Debug, Default, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BasysMx3;

impl Board for BasysMx3 {
    fn sysclk(&self) -> HertzU32 {
        40.MHz()
    }
}

/// Microchip Microstick II.
///
/// 40 MHz from the internal fast RC oscillator through the PLL.
#[derive(Debug, Default, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MicrostickIi;

impl Board for MicrostickIi {
    fn sysclk(&self) -> HertzU32 {
        40.MHz()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_clock_rates() {
        assert_eq!(Explorer1632.sysclk().to_Hz(), 80_000_000);
        assert_eq!(BasysMx3.sysclk().to_Hz(), 40_000_000);
        assert_eq!(MicrostickIi.sysclk().to_Hz(), 40_000_000);
    }
}

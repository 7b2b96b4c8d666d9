//! Sine-table tone generation over a PWM output.
//!
//! The audio output is a PWM channel fed from a 25-sample sine table, one
//! sample per pacing step. Any [`SetDutyCycle`] implementation works as the
//! output and any [`DelayNs`] as the pacing source; on hardware the pacing
//! delay should be a [`SpinDelay`](crate::util::SpinDelay) so tone playback
//! does not clobber core-timer stamps.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

/// One sine period over 25 samples, peak [`SINE_PEAK`].
pub const SINE_SAMPLES: [u16; 25] = [
    256, 320, 379, 431, 472, 499, 511, 507, 488, 453, 406, 350, 288, 224, 162, 106, 59, 24, 5, 1,
    13, 40, 81, 133, 192,
];

/// Full-scale value of [`SINE_SAMPLES`].
pub const SINE_PEAK: u16 = 511;

/// Tone pitch selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pitch {
    /// One table step every 20 us.
    High,
    /// One table step every 40 us.
    Low,
}

impl Pitch {
    fn step_us(self) -> u32 {
        match self {
            Pitch::High => 20,
            Pitch::Low => 40,
        }
    }

    fn steps_per_ms(self) -> u32 {
        match self {
            Pitch::High => 38,
            Pitch::Low => 20,
        }
    }
}

/// Tone generator over a PWM channel.
pub struct Tone<P, D> {
    pwm: P,
    delay: D,
    phase: usize,
}

impl<P: SetDutyCycle, D: DelayNs> Tone<P, D> {
    /// Uses `pwm` as the audio output and `delay` for sample pacing.
    pub fn new(pwm: P, delay: D) -> Self {
        Self {
            pwm,
            delay,
            phase: 0,
        }
    }

    /// Plays `pitch` for `ms` milliseconds, blocking.
    pub fn play(&mut self, pitch: Pitch, ms: u32) -> Result<(), P::Error> {
        let mut steps = ms.saturating_mul(pitch.steps_per_ms());
        while steps > 0 {
            steps -= 1;
            self.phase = (self.phase + 1) % SINE_SAMPLES.len();
            self.pwm
                .set_duty_cycle_fraction(SINE_SAMPLES[self.phase], SINE_PEAK)?;
            self.delay.delay_us(pitch.step_us());
        }
        Ok(())
    }

    /// Releases the PWM channel and the pacing delay.
    pub fn free(self) -> (P, D) {
        (self.pwm, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;

    struct MockPwm {
        max: u16,
        writes: u32,
        first: Option<u16>,
        last: u16,
    }

    impl embedded_hal::pwm::ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.writes += 1;
            self.first.get_or_insert(duty);
            self.last = duty;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    #[test]
    fn high_pitch_paces_38_steps_per_ms() {
        let pwm = MockPwm {
            max: SINE_PEAK,
            writes: 0,
            first: None,
            last: 0,
        };
        let mut tone = Tone::new(pwm, MockDelay::default());
        tone.play(Pitch::High, 1).unwrap();
        let (pwm, delay) = tone.free();
        assert_eq!(pwm.writes, 38);
        // With max duty equal to the table peak the duty equals the sample.
        assert_eq!(pwm.first, Some(SINE_SAMPLES[1]));
        assert_eq!(delay.total_ns, 38 * 20_000);
    }

    #[test]
    fn low_pitch_uses_the_slower_step() {
        let pwm = MockPwm {
            max: SINE_PEAK,
            writes: 0,
            first: None,
            last: 0,
        };
        let mut tone = Tone::new(pwm, MockDelay::default());
        tone.play(Pitch::Low, 2).unwrap();
        let (pwm, delay) = tone.free();
        assert_eq!(pwm.writes, 40);
        assert_eq!(delay.total_ns, 40 * 40_000);
    }

    #[test]
    fn duty_never_exceeds_the_pwm_range() {
        let pwm = MockPwm {
            max: 1000,
            writes: 0,
            first: None,
            last: 0,
        };
        let mut tone = Tone::new(pwm, MockDelay::default());
        tone.play(Pitch::High, 1).unwrap();
        let (pwm, _) = tone.free();
        assert!(pwm.last <= 1000);
    }
}

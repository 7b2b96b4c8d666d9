//! Poll-driven heartbeat LED.
//!
//! Blinks an LED when called repeatedly from the main loop. The blink rate
//! drops visibly as the loop gets busier, which makes the LED a rough CPU
//! load indicator.

use embedded_hal::digital::OutputPin;

/// Default number of polls per blink period.
const SKIP: u32 = 20_000;
/// Default poll count at which the LED turns off again (1 % duty).
const DUTY: u32 = 500;

/// Heartbeat state over an LED pin.
pub struct Heartbeat<P: OutputPin> {
    pin: P,
    period: u32,
    duty: u32,
    cnt: u32,
}

impl<P: OutputPin> Heartbeat<P> {
    /// Drives `pin` with the default period and duty.
    pub fn new(pin: P) -> Self {
        Self::with_period(pin, SKIP, DUTY)
    }

    /// Drives `pin`, turning it on every `period` polls and off again `duty`
    /// polls later.
    pub fn with_period(pin: P, period: u32, duty: u32) -> Self {
        Self {
            pin,
            period,
            duty,
            cnt: 0,
        }
    }

    /// Advances the heartbeat by one main-loop iteration.
    pub fn poll(&mut self) -> Result<(), P::Error> {
        self.cnt += 1;
        if self.cnt > self.period {
            self.cnt = 0;
            self.pin.set_high()
        } else if self.cnt == self.duty {
            self.pin.set_low()
        } else {
            Ok(())
        }
    }

    /// Releases the LED pin.
    pub fn free(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;

    #[derive(Default)]
    struct MockPin {
        high: bool,
        rising: u32,
        falling: u32,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.falling += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.rising += 1;
            Ok(())
        }
    }

    #[test]
    fn led_turns_on_at_rollover_and_off_at_duty() {
        let mut hb = Heartbeat::with_period(MockPin::default(), 10, 3);
        for _ in 0..10 {
            hb.poll().unwrap();
        }
        // No rising edge during the first period.
        assert_eq!(hb.pin.rising, 0);
        // The 11th poll rolls the counter over and lights the LED.
        hb.poll().unwrap();
        assert!(hb.pin.high);
        assert_eq!(hb.pin.rising, 1);
        hb.poll().unwrap();
        hb.poll().unwrap();
        assert!(hb.pin.high);
        // Duty count reached, LED off again.
        hb.poll().unwrap();
        assert!(!hb.pin.high);
    }

    #[test]
    fn blink_repeats_every_period() {
        let mut hb = Heartbeat::with_period(MockPin::default(), 10, 3);
        for _ in 0..55 {
            hb.poll().unwrap();
        }
        // Five full periods of eleven polls each.
        assert_eq!(hb.pin.rising, 5);
        assert_eq!(hb.pin.falling, 5);
    }
}

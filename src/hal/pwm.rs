//! [`PinDriver`] over any `embedded-hal` PWM channel.
//!
//! The indicator works in a 0..=[`MAX_DUTY`] duty range. [`PwmPin`] scales
//! that onto whatever resolution the channel reports, and drives digital
//! levels as 0% / 100% duty, so one LEDC (or other timer) channel covers
//! every pattern including breathing.
//!
//! ```rust
//! use core::convert::Infallible;
//! use embedded_hal::pwm::{ErrorType, SetDutyCycle};
//! use wifly485::hal::PwmPin;
//! use wifly485::traits::PinDriver;
//!
//! struct Channel(u16);
//!
//! impl ErrorType for Channel {
//!     type Error = Infallible;
//! }
//!
//! impl SetDutyCycle for Channel {
//!     fn max_duty_cycle(&self) -> u16 {
//!         255
//!     }
//!     fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
//!         self.0 = duty;
//!         Ok(())
//!     }
//! }
//!
//! let mut led = PwmPin::new(2, Channel(0));
//! led.set_digital(2, true).unwrap();
//! assert_eq!(led.channel().0, 255);
//! ```

use core::fmt;

use embedded_hal::pwm::SetDutyCycle;

use crate::traits::{PinDriver, PinId, MAX_DUTY};

/// Errors from [`PwmPin`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PwmPinError<E> {
    /// The request named a pin this channel does not drive.
    UnknownPin(PinId),
    /// The PWM channel rejected the duty cycle.
    Pwm(E),
}

impl<E: fmt::Debug> fmt::Display for PwmPinError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PwmPinError::UnknownPin(pin) => write!(f, "pin {} is not driven by this channel", pin),
            PwmPinError::Pwm(e) => write!(f, "pwm error: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for PwmPinError<E> {}

/// One LED pin driven through a PWM channel.
pub struct PwmPin<D> {
    pin: PinId,
    channel: D,
}

impl<D: SetDutyCycle> PwmPin<D> {
    /// Wrap `channel`, which is wired to GPIO `pin`.
    pub fn new(pin: PinId, channel: D) -> Self {
        Self { pin, channel }
    }

    /// The GPIO this channel drives.
    pub fn pin(&self) -> PinId {
        self.pin
    }

    /// The wrapped channel.
    pub fn channel(&self) -> &D {
        &self.channel
    }

    /// Unwrap the channel.
    pub fn into_inner(self) -> D {
        self.channel
    }

    fn check(&self, pin: PinId) -> Result<(), PwmPinError<D::Error>> {
        if pin == self.pin {
            Ok(())
        } else {
            Err(PwmPinError::UnknownPin(pin))
        }
    }

    /// Scale an indicator duty onto the channel's range.
    fn scale(&self, duty: u16) -> u16 {
        let max = u32::from(self.channel.max_duty_cycle());
        let duty = u32::from(duty.min(MAX_DUTY));
        // Fits: duty <= MAX_DUTY so the result is <= max
        (duty * max / u32::from(MAX_DUTY)) as u16
    }
}

impl<D: SetDutyCycle> PinDriver for PwmPin<D> {
    type Error = PwmPinError<D::Error>;

    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.check(pin)
    }

    fn set_digital(&mut self, pin: PinId, high: bool) -> Result<(), Self::Error> {
        self.check(pin)?;
        let result = if high {
            self.channel.set_duty_cycle_fully_on()
        } else {
            self.channel.set_duty_cycle_fully_off()
        };
        result.map_err(PwmPinError::Pwm)
    }

    fn set_analog(&mut self, pin: PinId, duty: u16) -> Result<(), Self::Error> {
        self.check(pin)?;
        let scaled = self.scale(duty);
        self.channel
            .set_duty_cycle(scaled)
            .map_err(PwmPinError::Pwm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    struct FakeChannel {
        max: u16,
        duty: u16,
    }

    impl ErrorType for FakeChannel {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakeChannel {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    fn pwm(max: u16) -> PwmPin<FakeChannel> {
        PwmPin::new(2, FakeChannel { max, duty: 7 })
    }

    #[test]
    fn digital_levels_use_full_range() {
        let mut led = pwm(8191);
        led.set_digital(2, true).unwrap();
        assert_eq!(led.channel().duty, 8191);
        led.set_digital(2, false).unwrap();
        assert_eq!(led.channel().duty, 0);
    }

    #[test]
    fn analog_scales_to_channel() {
        let mut led = pwm(8191);
        led.set_analog(2, MAX_DUTY).unwrap();
        assert_eq!(led.channel().duty, 8191);
        led.set_analog(2, 0).unwrap();
        assert_eq!(led.channel().duty, 0);

        let mut led = pwm(MAX_DUTY);
        led.set_analog(2, 512).unwrap();
        assert_eq!(led.channel().duty, 512);
    }

    #[test]
    fn analog_clamps_out_of_range_duty() {
        let mut led = pwm(255);
        led.set_analog(2, u16::MAX).unwrap();
        assert_eq!(led.channel().duty, 255);
    }

    #[test]
    fn other_pins_rejected() {
        let mut led = pwm(255);
        assert_eq!(led.configure_output(4), Err(PwmPinError::UnknownPin(4)));
        assert_eq!(led.set_digital(4, true), Err(PwmPinError::UnknownPin(4)));
        assert_eq!(led.channel().duty, 7);
        assert!(led.configure_output(2).is_ok());
    }
}

//! Hardware abstraction traits for the status LED pin and the time source.
//!
//! These are the only two collaborators the indicator engine talks to. Keeping
//! them behind traits lets the engine run unchanged on the ESP32 and on a
//! desktop test host.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`PinDriver`] | Digital and PWM output on a numbered pin |
//! | [`Clock`] | Monotonic millisecond time source |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. Any embedded-hal PWM channel can be used through
//! [`crate::hal::PwmPin`], and the ESP32 specifics live in `hal::esp32`
//! (requires the `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use wifly485::traits::PinDriver;
//! use wifly485::hal::MockPin;
//!
//! let mut pin = MockPin::new();
//! pin.configure_output(2).unwrap();
//! pin.set_digital(2, true).unwrap();
//! assert_eq!(pin.level(2), Some(true));
//! ```

/// Identifier of a GPIO pin, as numbered on the board.
pub type PinId = u8;

/// Maximum PWM duty value accepted by [`PinDriver::set_analog`].
///
/// Matches the 10-bit `analogWrite` range of the bridge hardware.
pub const MAX_DUTY: u16 = 1023;

/// Output pin driver trait - abstracts digital and PWM writes.
///
/// The indicator engine calls [`configure_output`](Self::configure_output) once
/// during initialization and afterwards at most one write per tick.
///
/// # Implementation Notes
///
/// - Writes are expected to be cheap and non-blocking
/// - `set_analog` receives values in `0..=MAX_DUTY`; implementations may
///   clamp anything larger
/// - Report [`is_ready`](Self::is_ready) `false` until the underlying
///   peripheral has been brought up
///
/// # Example Implementation
///
/// ```rust,ignore
/// use wifly485::traits::{PinDriver, PinId};
///
/// struct MyGpio { /* hardware handles */ }
///
/// impl PinDriver for MyGpio {
///     type Error = ();
///
///     fn configure_output(&mut self, pin: PinId) -> Result<(), ()> {
///         // Set pin mode...
///         Ok(())
///     }
///
///     fn set_digital(&mut self, pin: PinId, high: bool) -> Result<(), ()> {
///         // Drive the pin...
///         Ok(())
///     }
///
///     fn set_analog(&mut self, pin: PinId, duty: u16) -> Result<(), ()> {
///         // Update PWM duty...
///         Ok(())
///     }
/// }
/// ```
pub trait PinDriver {
    /// Error type for pin operations.
    type Error;

    /// Returns true once the driver can accept pin operations.
    fn is_ready(&self) -> bool {
        true
    }

    /// Configure `pin` as an output.
    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Drive `pin` high (`true`) or low (`false`).
    fn set_digital(&mut self, pin: PinId, high: bool) -> Result<(), Self::Error>;

    /// Set the PWM duty of `pin`, `0..=MAX_DUTY`.
    fn set_analog(&mut self, pin: PinId, duty: u16) -> Result<(), Self::Error>;
}

impl<T: PinDriver + ?Sized> PinDriver for &mut T {
    type Error = T::Error;

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        (**self).configure_output(pin)
    }

    fn set_digital(&mut self, pin: PinId, high: bool) -> Result<(), Self::Error> {
        (**self).set_digital(pin, high)
    }

    fn set_analog(&mut self, pin: PinId, duty: u16) -> Result<(), Self::Error> {
        (**self).set_analog(pin, duty)
    }
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for pattern timing and the error
/// lock. On desktop, this can wrap `std::time::Instant`. On embedded, use a
/// hardware timer.
///
/// # Example
///
/// ```rust
/// use wifly485::traits::Clock;
/// use wifly485::hal::MockClock;
///
/// let clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `pwm`: Adapter over any `embedded-hal` PWM channel
//! - `esp32`: ESP32 LEDC status LED and system clock (requires `esp32` feature)

pub mod mock;
pub mod pwm;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use mock::*;
pub use pwm::{PwmPin, PwmPinError};

#[cfg(feature = "esp32")]
pub use esp32::*;

//! Trait definitions for hardware abstraction.
//!
//! This module defines the abstractions that allow the indicator engine to:
//! - Run on different hardware (ESP32, any embedded-hal PWM channel, desktop mock)
//! - Be driven by a simulated clock in tests
//!
//! # Hardware Abstraction
//!
//! - [`PinDriver`]: Digital and PWM output on a numbered pin
//! - [`Clock`]: Time source for `no_std` environments

pub mod hardware;

pub use hardware::*;

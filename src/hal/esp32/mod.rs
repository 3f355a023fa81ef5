//! ESP32 hardware abstraction layer for the WiFly485 bridge.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32 DevKit (onboard blue LED on GPIO2)
//! - **Status LED**: LEDC channel 0, 10-bit, 5 kHz
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments.

mod clock;
mod led;

pub use clock::Esp32Clock;
pub use led::{status_led, Esp32Led};

/// Pin assignments for the bridge board.
pub mod pins {
    use crate::traits::PinId;

    /// Status LED (onboard LED on most DevKit boards)
    pub const STATUS_LED: PinId = 2;
}

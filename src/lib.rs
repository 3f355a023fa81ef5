//! # wifly485
//!
//! Status indicator engine for the WiFly485 WiFi-to-RS485 bridge.
//!
//! A single LED tells the user what the bridge is doing: connecting to WiFi,
//! waiting for provisioning, negotiating the master/slave link, moving data or
//! reporting a fault. Many services want the LED at once, so requests are
//! arbitrated by priority and the winner is rendered without ever blocking the
//! superloop.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the LED pin and the millisecond clock
//! - **Priority arbitration**: Higher or equal priority wins, lower is ignored
//! - **Error lock**: The fault pattern holds off every other state for 5 seconds
//! - **Non-blocking patterns**: Blinks from 0.3 Hz to 10 Hz, a double-flash error and a breathing ramp
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Pin driver and clock abstractions
//! - `state` - States, priorities and stamped requests
//! - `arbitration` - Request gate and error lock
//! - `patterns` - Time-driven pattern renderers
//! - `indicator` - Engine that ties everything together
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use wifly485::{BridgeCondition, LedIndicator, LedState};
//! use wifly485::hal::{MockClock, MockPin};
//!
//! let clock = MockClock::new();
//! let mut led = LedIndicator::new(MockPin::new(), &clock);
//! led.initialize().unwrap();
//!
//! // Services report what they are doing
//! led.indicate(BridgeCondition::WifiConnecting);
//!
//! // Update in your main loop
//! led.update().unwrap();
//! clock.advance(20); // 20ms tick
//! led.update().unwrap();
//!
//! assert_eq!(led.current_state(), LedState::BlinkNormal2Hz);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

/// Request gate deciding which state the LED shows.
pub mod arbitration;
/// Bridge conditions and how each one is shown.
pub mod conditions;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// The status LED engine.
pub mod indicator;
/// Non-blocking pattern renderers.
pub mod patterns;
/// Indicator states, priorities and requests.
pub mod state;
/// Core traits for hardware abstraction.
pub mod traits;

/// Shared configuration system for desktop and ESP32.
pub mod config;

/// Message types for remote diagnostics (serde-based).
#[cfg(feature = "serde")]
pub mod messages;

// Re-exports for convenience
pub use arbitration::{ErrorLockStatus, StateArbiter, Verdict, ERROR_LOCK_MS};
pub use conditions::BridgeCondition;
pub use indicator::{IndicatorError, IndicatorSnapshot, LedIndicator};
pub use patterns::{BreatheTiming, Pattern, PinOutput};
pub use state::{LedPriority, LedState, StateRequest};
pub use traits::{Clock, PinDriver, PinId, MAX_DUTY};

// Config re-exports
pub use config::{Config, DeviceConfig, DeviceRole, IndicatorConfig, LoopConfig};

// Message re-exports
#[cfg(feature = "serde")]
pub use messages::{ConditionReport, IndicatorRequest};

// Parsing function re-exports (serde-json-core based)
#[cfg(feature = "serde-json-core")]
pub use messages::{parse_condition_report, parse_indicator_request};

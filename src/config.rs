//! Shared configuration for the indicator and the bridge superloop.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use wifly485::config::{Config, DeviceConfig, DeviceRole, IndicatorConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.indicator.pin, 2);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_indicator(IndicatorConfig::default().with_pin(13))
//!     .with_device(DeviceConfig::for_role(DeviceRole::Slave));
//! assert_eq!(config.device.name.as_str(), "WiFly485_Slave");
//! ```

use crate::arbitration::ERROR_LOCK_MS;
use crate::patterns::BreatheTiming;
use crate::traits::PinId;
use heapless::String as HString;

/// Maximum length for short config strings (device names)
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Slowest superloop interval that still resolves the 50 ms ultra-fast blink.
pub const MAX_UPDATE_INTERVAL_MS: u32 = 50;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    // Cut at the last char boundary that fits
    let valid_end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|end| *end <= MAX_SHORT_STRING)
        .last()
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Status LED configuration
    pub indicator: IndicatorConfig,
    /// Superloop timing
    pub main_loop: LoopConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl Config {
    /// Set indicator configuration
    pub fn with_indicator(mut self, indicator: IndicatorConfig) -> Self {
        self.indicator = indicator;
        self
    }

    /// Set loop configuration
    pub fn with_main_loop(mut self, main_loop: LoopConfig) -> Self {
        self.main_loop = main_loop;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Indicator Config
// ============================================================================

/// Status LED configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorConfig {
    /// GPIO driving the LED
    pub pin: PinId,
    /// How long the error pattern holds off other states (milliseconds)
    pub error_lock_ms: u64,
    /// Duty change per breathing step
    pub breathe_step: u16,
    /// Time between breathing steps (milliseconds)
    pub breathe_interval_ms: u32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            pin: 2,
            error_lock_ms: ERROR_LOCK_MS,
            breathe_step: 5,
            breathe_interval_ms: 20,
        }
    }
}

impl IndicatorConfig {
    /// Set the LED pin
    pub fn with_pin(mut self, pin: PinId) -> Self {
        self.pin = pin;
        self
    }

    /// Set the error lock duration
    pub fn with_error_lock_ms(mut self, ms: u64) -> Self {
        self.error_lock_ms = ms;
        self
    }

    /// Set the breathing ramp step size (at least 1)
    pub fn with_breathe_step(mut self, step: u16) -> Self {
        self.breathe_step = step.max(1);
        self
    }

    /// Set the breathing ramp step interval (zero is treated as 1 ms)
    pub fn with_breathe_interval_ms(mut self, ms: u32) -> Self {
        self.breathe_interval_ms = ms;
        self
    }

    /// Breathing timing for the pattern renderer
    pub fn breathe_timing(&self) -> BreatheTiming {
        BreatheTiming {
            step: self.breathe_step.max(1),
            interval_ms: u64::from(self.breathe_interval_ms.max(1)),
        }
    }
}

// ============================================================================
// Loop Config
// ============================================================================

/// Superloop timing configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopConfig {
    /// Time between `update()` calls (milliseconds)
    pub update_interval_ms: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 20,
        }
    }
}

impl LoopConfig {
    /// Set the update interval
    pub fn with_update_interval_ms(mut self, ms: u32) -> Self {
        self.update_interval_ms = ms;
        self
    }

    /// Check that the loop is fast enough for the 10 Hz blink
    pub fn resolves_fastest_blink(&self) -> bool {
        self.update_interval_ms <= MAX_UPDATE_INTERVAL_MS
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Role of the bridge in a master/slave pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeviceRole {
    /// Owns the configuration and accepts the slave's connection.
    #[default]
    Master,
    /// Connects to a master and mirrors its configuration.
    Slave,
}

impl DeviceRole {
    /// Returns the role as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DeviceRole::Master => "master",
            DeviceRole::Slave => "slave",
        }
    }

    /// Parse a role from text, case-insensitive.
    pub fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("master") {
            Some(DeviceRole::Master)
        } else if s.eq_ignore_ascii_case("slave") {
            Some(DeviceRole::Slave)
        } else {
            None
        }
    }

    /// Factory default device name for this role
    pub const fn default_name(&self) -> &'static str {
        match self {
            DeviceRole::Master => "WiFly485_Master",
            DeviceRole::Slave => "WiFly485_Slave",
        }
    }
}

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Master or slave
    pub role: DeviceRole,
    /// Human-readable device name
    pub name: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::for_role(DeviceRole::default())
    }
}

impl DeviceConfig {
    /// Default configuration for a role, named after it
    pub fn for_role(role: DeviceRole) -> Self {
        Self {
            role,
            name: short_string(role.default_name()),
        }
    }

    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

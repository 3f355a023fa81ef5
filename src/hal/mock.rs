//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the hardware traits, enabling
//! development and testing of the indicator on desktop.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPin`] | [`PinDriver`] | Records every pin write |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//!
//! # Example
//!
//! ```rust
//! use wifly485::{LedIndicator, LedState};
//! use wifly485::hal::{MockClock, MockPin};
//!
//! let clock = MockClock::new();
//! let mut led = LedIndicator::new(MockPin::new(), &clock);
//! led.initialize().unwrap();
//!
//! led.turn_on();
//! led.update().unwrap();
//!
//! // Verify via the recorded writes
//! assert_eq!(led.driver().level(2), Some(true));
//! assert_eq!(led.current_state(), LedState::On);
//! ```
//!
//! [`PinDriver`]: crate::traits::PinDriver
//! [`Clock`]: crate::traits::Clock

extern crate alloc;
use alloc::vec::Vec;

use core::cell::Cell;

use crate::traits::{Clock, PinDriver, PinId};

// ============================================================================
// Pin Mock
// ============================================================================

/// A single recorded pin operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinWrite {
    /// `set_digital(pin, high)`
    Digital {
        /// Pin written.
        pin: PinId,
        /// Level written.
        high: bool,
    },
    /// `set_analog(pin, duty)`
    Analog {
        /// Pin written.
        pin: PinId,
        /// Duty written.
        duty: u16,
    },
}

impl PinWrite {
    /// The pin this write targeted.
    pub fn pin(&self) -> PinId {
        match *self {
            PinWrite::Digital { pin, .. } | PinWrite::Analog { pin, .. } => pin,
        }
    }
}

/// Mock pin driver for testing.
///
/// Records every write in order. Use the public fields to inspect state after
/// test operations, or to inject failures.
///
/// # Example
///
/// ```rust
/// use wifly485::hal::{MockPin, PinWrite};
/// use wifly485::traits::PinDriver;
///
/// let mut pin = MockPin::new();
/// pin.configure_output(2).unwrap();
/// pin.set_digital(2, true).unwrap();
/// pin.set_analog(2, 512).unwrap();
///
/// assert_eq!(pin.configured, [2]);
/// assert_eq!(pin.writes.len(), 2);
/// assert_eq!(pin.last_duty(2), Some(512));
/// assert_eq!(pin.last_write(), Some(PinWrite::Analog { pin: 2, duty: 512 }));
/// ```
#[derive(Debug)]
pub struct MockPin {
    /// Every write, oldest first.
    pub writes: Vec<PinWrite>,
    /// Pins passed to `configure_output`, in order.
    pub configured: Vec<PinId>,
    /// Value returned by `is_ready`.
    pub ready: bool,
    /// When set, every operation fails with `Err(())`.
    pub fail_writes: bool,
}

impl MockPin {
    /// Creates a ready mock pin driver with no recorded writes.
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            configured: Vec::new(),
            ready: true,
            fail_writes: false,
        }
    }

    /// Creates a mock whose GPIO controller is not ready.
    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    /// Most recent write to any pin.
    pub fn last_write(&self) -> Option<PinWrite> {
        self.writes.last().copied()
    }

    /// Writes that targeted `pin`.
    pub fn writes_to(&self, pin: PinId) -> impl Iterator<Item = &PinWrite> + '_ {
        self.writes.iter().filter(move |w| w.pin() == pin)
    }

    /// Last digital level written to `pin`.
    ///
    /// An analog write counts as lit when its duty is non-zero.
    pub fn level(&self, pin: PinId) -> Option<bool> {
        self.writes_to(pin).last().map(|w| match *w {
            PinWrite::Digital { high, .. } => high,
            PinWrite::Analog { duty, .. } => duty > 0,
        })
    }

    /// Last analog duty written to `pin`, if the last write was analog.
    pub fn last_duty(&self, pin: PinId) -> Option<u16> {
        match self.writes_to(pin).last() {
            Some(PinWrite::Analog { duty, .. }) => Some(*duty),
            _ => None,
        }
    }

    /// Forget recorded writes.
    pub fn clear(&mut self) {
        self.writes.clear();
    }

    fn check(&self) -> Result<(), ()> {
        if self.fail_writes {
            Err(())
        } else {
            Ok(())
        }
    }
}

impl Default for MockPin {
    fn default() -> Self {
        Self::new()
    }
}

impl PinDriver for MockPin {
    type Error = ();

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn configure_output(&mut self, pin: PinId) -> Result<(), ()> {
        self.check()?;
        self.configured.push(pin);
        Ok(())
    }

    fn set_digital(&mut self, pin: PinId, high: bool) -> Result<(), ()> {
        self.check()?;
        self.writes.push(PinWrite::Digital { pin, high });
        Ok(())
    }

    fn set_analog(&mut self, pin: PinId, duty: u16) -> Result<(), ()> {
        self.check()?;
        self.writes.push(PinWrite::Analog { pin, duty });
        Ok(())
    }
}

// ============================================================================
// Clock Mock
// ============================================================================

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
/// Time is held in a [`Cell`], so a test can keep advancing the clock while
/// the indicator holds a shared reference to it.
///
/// # Example
///
/// ```rust
/// use wifly485::hal::MockClock;
/// use wifly485::traits::Clock;
///
/// let clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: Cell<u64>,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a new mock clock starting at `ms`.
    pub fn starting_at(ms: u64) -> Self {
        Self {
            current_ms: Cell::new(ms),
        }
    }

    /// Sets the current time in milliseconds.
    pub fn set(&self, ms: u64) {
        self.current_ms.set(ms);
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, ms: u64) {
        self.current_ms.set(self.current_ms.get().saturating_add(ms));
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms.get()
    }
}

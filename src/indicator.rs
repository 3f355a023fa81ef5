//! The status LED engine.
//!
//! This module provides [`LedIndicator`], which owns the LED pin, arbitrates
//! incoming state requests and renders the winning pattern.
//!
//! # Overview
//!
//! The indicator:
//! - Accepts state requests from any service ([`request_state`](LedIndicator::request_state))
//! - Keeps the error pattern up for at least the error lock window
//! - Renders blinks, the error double flash and the breathing ramp without blocking
//! - Provides state snapshots for diagnostics
//!
//! # Example
//!
//! ```rust
//! use wifly485::{LedIndicator, LedPriority, LedState};
//! use wifly485::hal::{MockClock, MockPin};
//!
//! let clock = MockClock::new();
//! let mut led = LedIndicator::new(MockPin::new(), &clock);
//! led.initialize().unwrap();
//!
//! led.request_state(LedState::BlinkSlow, LedPriority::Normal);
//!
//! // Main loop - call update() every tick (e.g., 20ms)
//! for _ in 0..50 {
//!     led.update().unwrap();
//!     clock.advance(20);
//! }
//! assert_eq!(led.current_state(), LedState::BlinkSlow);
//! ```
//!
//! # Error Lock
//!
//! ```rust
//! use wifly485::{LedIndicator, LedPriority, LedState};
//! use wifly485::hal::{MockClock, MockPin};
//!
//! let clock = MockClock::new();
//! let mut led = LedIndicator::new(MockPin::new(), &clock);
//! led.initialize().unwrap();
//!
//! led.set_error_state();
//! led.update().unwrap();
//!
//! // Nothing else gets through for five seconds
//! clock.advance(1_000);
//! assert!(!led.request_state(LedState::On, LedPriority::Critical));
//!
//! clock.advance(4_000);
//! assert!(led.request_state(LedState::On, LedPriority::Critical));
//! ```

use core::fmt;

use crate::arbitration::{ErrorLockStatus, StateArbiter};
use crate::conditions::BridgeCondition;
use crate::config::IndicatorConfig;
use crate::patterns::{BreatheTiming, Pattern, PinOutput};
use crate::state::{LedPriority, LedState, StateRequest};
use crate::traits::{Clock, PinDriver, PinId};

/// Why [`LedIndicator::initialize`] failed.
///
/// Only the indicator is affected; the rest of the bridge keeps running
/// without visual feedback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndicatorError<E> {
    /// The pin driver reported it is not ready.
    DriverNotReady,
    /// Configuring or writing the pin failed.
    Pin(E),
}

impl<E: fmt::Debug> fmt::Display for IndicatorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorError::DriverNotReady => f.write_str("pin driver not ready"),
            IndicatorError::Pin(e) => write!(f, "pin operation failed: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for IndicatorError<E> {}

/// Status LED engine.
///
/// Owns one output pin. State requests go through a [`StateArbiter`]; the
/// winning state is rendered by a [`Pattern`] that is restarted whenever the
/// shown state or its priority changes.
///
/// # Type Parameters
///
/// - `P`: The pin driver ([`PinDriver`] trait). `&mut P` works too.
/// - `C`: The time source ([`Clock`] trait). `&C` works too, which lets tests
///   keep a handle on a [`MockClock`](crate::hal::MockClock).
///
/// # Thread Safety
///
/// Not thread-safe, and not meant to be: `request_state` and `update` are
/// both called from the superloop.
pub struct LedIndicator<P: PinDriver, C: Clock> {
    driver: P,
    clock: C,
    pin: PinId,
    initialized: bool,
    arbiter: StateArbiter,
    pattern: Pattern,
    breathe: BreatheTiming,
}

impl<P: PinDriver, C: Clock> LedIndicator<P, C> {
    /// Create an indicator with the default configuration (LED on GPIO2).
    pub fn new(driver: P, clock: C) -> Self {
        Self::with_config(driver, clock, &IndicatorConfig::default())
    }

    /// Create an indicator from a configuration.
    pub fn with_config(driver: P, clock: C, config: &IndicatorConfig) -> Self {
        Self {
            driver,
            clock,
            pin: config.pin,
            initialized: false,
            arbiter: StateArbiter::new(config.error_lock_ms),
            pattern: Pattern::default(),
            breathe: config.breathe_timing(),
        }
    }

    /// Bring up the LED pin and show `Off`.
    ///
    /// Fails with [`IndicatorError::DriverNotReady`] if the driver is not
    /// ready, or with the driver's error if configuring the pin fails. Until
    /// this succeeds, [`update`](Self::update) renders nothing.
    ///
    /// Calling it again re-runs the bring-up and forces `Off` whatever is
    /// shown, dropping pending requests and any error lock.
    pub fn initialize(&mut self) -> Result<(), IndicatorError<P::Error>> {
        if !self.driver.is_ready() {
            log::warn!("led: pin driver not ready, indicator disabled");
            return Err(IndicatorError::DriverNotReady);
        }

        self.driver
            .configure_output(self.pin)
            .map_err(IndicatorError::Pin)?;
        self.driver
            .set_digital(self.pin, false)
            .map_err(IndicatorError::Pin)?;

        self.arbiter.reset(self.clock.now_ms());
        self.pattern = Pattern::default();
        self.initialized = true;

        log::info!("led: initialized on pin {}", self.pin);
        Ok(())
    }

    /// [`initialize`](Self::initialize), reporting only success.
    pub fn try_initialize(&mut self) -> bool {
        self.initialize().is_ok()
    }

    /// Configure `pin` as the LED output and drive it low.
    ///
    /// Once initialized, the shown pattern restarts on the new pin and its
    /// entry level is written straight away.
    pub fn configure(&mut self, pin: PinId) -> Result<(), P::Error> {
        self.pin = pin;
        self.driver.configure_output(pin)?;
        self.driver.set_digital(pin, false)?;
        log::debug!("led: configured pin {}", pin);

        if self.initialized {
            let now_ms = self.clock.now_ms();
            let (pattern, entry) = Pattern::start(self.current_state(), now_ms, self.breathe);
            self.pattern = pattern;
            if let Some(output) = entry {
                self.write(output)?;
            }
        }
        Ok(())
    }

    /// Ask for `state` at `priority`.
    ///
    /// Returns true if the request was accepted; it is shown from the next
    /// [`update`](Self::update). Rejection is a normal outcome, not an error.
    pub fn request_state(&mut self, state: LedState, priority: LedPriority) -> bool {
        let request = StateRequest::new(state, priority, self.clock.now_ms());
        self.arbiter.submit(request)
    }

    /// Ask for a state by its numeric code at [`LedPriority::Normal`].
    ///
    /// Unknown codes are ignored and return false.
    pub fn request_state_code(&mut self, code: u8) -> bool {
        match LedState::from_code(code) {
            Some(state) => self.request_state(state, LedPriority::Normal),
            None => {
                log::debug!("led: ignored unknown state code {}", code);
                false
            }
        }
    }

    /// Show the indication for a bridge condition.
    pub fn indicate(&mut self, condition: BridgeCondition) -> bool {
        let (state, priority) = condition.indication();
        self.request_state(state, priority)
    }

    /// Advance the indicator - call every superloop tick (at most 50 ms apart).
    ///
    /// Applies the pending request if it differs from the shown one, then
    /// renders the shown pattern. Never blocks and writes the pin at most once.
    pub fn update(&mut self) -> Result<(), P::Error> {
        if !self.initialized {
            return Ok(());
        }

        let now_ms = self.clock.now_ms();

        if let Some(applied) = self.arbiter.apply_pending() {
            log::trace!(
                "led: showing {} ({}) at {}ms",
                applied.state.as_str(),
                applied.priority.as_str(),
                now_ms
            );
            let (pattern, entry) = Pattern::start(applied.state, now_ms, self.breathe);
            self.pattern = pattern;
            if let Some(output) = entry {
                self.write(output)?;
            }
        }

        match self.pattern.tick(now_ms) {
            Some(output) => self.write(output),
            None => Ok(()),
        }
    }

    fn write(&mut self, output: PinOutput) -> Result<(), P::Error> {
        match output {
            PinOutput::Digital(high) => self.driver.set_digital(self.pin, high),
            PinOutput::Analog(duty) => self.driver.set_analog(self.pin, duty),
        }
    }

    // ------------------------------------------------------------------------
    // Convenience requests
    // ------------------------------------------------------------------------

    /// Steady on at normal priority (device idle).
    pub fn turn_on(&mut self) -> bool {
        self.request_state(LedState::On, LedPriority::Normal)
    }

    /// Off at low priority.
    pub fn turn_off(&mut self) -> bool {
        self.request_state(LedState::Off, LedPriority::Low)
    }

    /// 1 Hz blink at normal priority.
    pub fn blink_slow(&mut self) -> bool {
        self.request_state(LedState::BlinkSlow, LedPriority::Normal)
    }

    /// 5 Hz blink at high priority.
    pub fn blink_fast(&mut self) -> bool {
        self.request_state(LedState::BlinkFast, LedPriority::High)
    }

    /// Error double flash at critical priority.
    pub fn set_error_state(&mut self) -> bool {
        self.indicate(BridgeCondition::Fault)
    }

    /// Access point waiting for provisioning.
    pub fn blink_hotspot_wait(&mut self) -> bool {
        self.indicate(BridgeCondition::HotspotWait)
    }

    /// Station mode connecting.
    pub fn blink_wifi_connecting(&mut self) -> bool {
        self.indicate(BridgeCondition::WifiConnecting)
    }

    /// Master/slave link negotiating.
    pub fn blink_master_slave_connecting(&mut self) -> bool {
        self.indicate(BridgeCondition::PeerNegotiating)
    }

    /// Configuration replication in progress.
    pub fn blink_config_sync(&mut self) -> bool {
        self.indicate(BridgeCondition::ConfigSync)
    }

    /// Provisioning / configuration mode.
    pub fn blink_config_mode(&mut self) -> bool {
        self.indicate(BridgeCondition::ConfigMode)
    }

    /// Breathing ramp, shown while data is flowing.
    pub fn breathe(&mut self) -> bool {
        self.indicate(BridgeCondition::DataTransfer)
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// The state being shown.
    pub fn current_state(&self) -> LedState {
        self.arbiter.current().state
    }

    /// Numeric code of the state being shown.
    pub fn state_code(&self) -> u8 {
        self.current_state().code()
    }

    /// Priority of the state being shown.
    pub fn current_priority(&self) -> LedPriority {
        self.arbiter.current().priority
    }

    /// Accepted request not yet shown, if any.
    pub fn pending(&self) -> Option<StateRequest> {
        self.arbiter
            .has_pending()
            .then(|| *self.arbiter.requested())
    }

    /// Active error lock, if any.
    pub fn error_lock(&self) -> Option<ErrorLockStatus> {
        self.arbiter.error_lock(self.clock.now_ms())
    }

    /// Returns true once [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The LED pin.
    pub fn pin(&self) -> PinId {
        self.pin
    }

    /// The renderer of the shown state.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Shared access to the pin driver.
    pub fn driver(&self) -> &P {
        &self.driver
    }

    /// Exclusive access to the pin driver.
    pub fn driver_mut(&mut self) -> &mut P {
        &mut self.driver
    }

    /// Get the full state for diagnostics
    pub fn snapshot(&self) -> IndicatorSnapshot {
        let current = self.arbiter.current();
        IndicatorSnapshot {
            state: current.state,
            priority: current.priority,
            since_ms: current.timestamp_ms,
            pending: self.pending().map(|r| r.state),
            error_lock: self.error_lock(),
            initialized: self.initialized,
            pin: self.pin,
        }
    }

    /// Give back the pin driver and clock.
    pub fn release(self) -> (P, C) {
        (self.driver, self.clock)
    }
}

/// Full state snapshot for diagnostics.
///
/// # Example
///
/// ```rust
/// use wifly485::{LedIndicator, LedState};
/// use wifly485::hal::{MockClock, MockPin};
///
/// let led = LedIndicator::new(MockPin::new(), MockClock::new());
///
/// let snapshot = led.snapshot();
/// assert_eq!(snapshot.state, LedState::Off);
/// assert!(!snapshot.initialized);
/// assert!(snapshot.error_lock.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorSnapshot {
    /// State being shown.
    pub state: LedState,
    /// Priority of the state being shown.
    pub priority: LedPriority,
    /// When the shown state was accepted (milliseconds since start).
    pub since_ms: u64,
    /// Accepted state waiting for the next update, if any.
    pub pending: Option<LedState>,
    /// Active error lock, if any.
    pub error_lock: Option<ErrorLockStatus>,
    /// Whether the indicator has been initialized.
    pub initialized: bool,
    /// LED pin.
    pub pin: PinId,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockClock, MockPin, PinWrite};

    fn ready(clock: &MockClock) -> LedIndicator<MockPin, &MockClock> {
        let mut led = LedIndicator::new(MockPin::new(), clock);
        led.initialize().unwrap();
        led.update().unwrap();
        led
    }

    #[test]
    fn initialize_configures_pin_and_drives_low() {
        let clock = MockClock::new();
        let mut led = LedIndicator::new(MockPin::new(), &clock);
        led.initialize().unwrap();

        assert!(led.is_initialized());
        assert_eq!(led.driver().configured, [2]);
        assert_eq!(led.driver().level(2), Some(false));
        assert_eq!(led.current_state(), LedState::Off);
    }

    #[test]
    fn initialize_fails_when_driver_not_ready() {
        let clock = MockClock::new();
        let mut led = LedIndicator::new(MockPin::not_ready(), &clock);

        assert_eq!(led.initialize(), Err(IndicatorError::DriverNotReady));
        assert!(!led.try_initialize());
        assert!(!led.is_initialized());
        assert!(led.driver().writes.is_empty());
    }

    #[test]
    fn initialize_propagates_pin_error() {
        let clock = MockClock::new();
        let mut pin = MockPin::new();
        pin.fail_writes = true;
        let mut led = LedIndicator::new(pin, &clock);

        assert_eq!(led.initialize(), Err(IndicatorError::Pin(())));
        assert!(!led.is_initialized());
    }

    #[test]
    fn update_before_initialize_renders_nothing() {
        let clock = MockClock::new();
        let mut led = LedIndicator::new(MockPin::new(), &clock);

        assert!(led.turn_on());
        led.update().unwrap();

        assert!(led.driver().writes.is_empty());
        assert_eq!(led.current_state(), LedState::Off);
    }

    #[test]
    fn request_takes_effect_on_update() {
        let clock = MockClock::new();
        let mut led = ready(&clock);

        assert!(led.turn_on());
        assert_eq!(led.current_state(), LedState::Off);
        assert_eq!(led.pending().map(|r| r.state), Some(LedState::On));

        led.update().unwrap();
        assert_eq!(led.current_state(), LedState::On);
        assert_eq!(led.driver().level(2), Some(true));
        assert!(led.pending().is_none());
    }

    #[test]
    fn at_most_one_write_per_update() {
        let clock = MockClock::new();
        let mut led = ready(&clock);

        for state in LedState::ALL {
            led.request_state(state, LedPriority::Low);
            let before = led.driver().writes.len();
            led.update().unwrap();
            assert!(led.driver().writes.len() - before <= 1, "{:?}", state);
            clock.advance(10_000);
            let before = led.driver().writes.len();
            led.update().unwrap();
            assert!(led.driver().writes.len() - before <= 1, "{:?}", state);
        }
    }

    #[test]
    fn state_code_requests() {
        let clock = MockClock::new();
        let mut led = ready(&clock);

        assert!(led.request_state_code(5));
        led.update().unwrap();
        assert_eq!(led.current_state(), LedState::BlinkFast);
        assert_eq!(led.current_priority(), LedPriority::Normal);
        assert_eq!(led.state_code(), 5);

        assert!(!led.request_state_code(42));
        assert_eq!(led.state_code(), 5);
    }

    #[test]
    fn configure_moves_pattern_to_new_pin() {
        let clock = MockClock::new();
        let mut led = ready(&clock);
        led.configure(13).unwrap();
        assert_eq!(led.pin(), 13);

        led.turn_on();
        led.update().unwrap();
        assert_eq!(led.driver().level(13), Some(true));
        assert_eq!(led.driver().level(2), Some(false));
    }

    #[test]
    fn configure_while_on_lights_new_pin() {
        let clock = MockClock::new();
        let mut led = ready(&clock);
        led.turn_on();
        led.update().unwrap();

        led.configure(13).unwrap();
        for _ in 0..10 {
            clock.advance(20);
            led.update().unwrap();
        }
        assert_eq!(led.current_state(), LedState::On);
        assert_eq!(led.driver().level(13), Some(true));
    }

    #[test]
    fn configure_restarts_blink_on_new_pin() {
        let clock = MockClock::new();
        let mut led = ready(&clock);
        led.blink_slow();
        led.update().unwrap();
        clock.set(600);
        led.update().unwrap();
        assert_eq!(led.driver().level(2), Some(true));

        led.configure(4).unwrap();
        assert_eq!(led.driver().level(4), Some(false));
        clock.set(1_100);
        led.update().unwrap();
        assert_eq!(led.driver().level(4), Some(true));
    }

    #[test]
    fn reinitialize_forces_off() {
        let clock = MockClock::new();
        let mut led = ready(&clock);
        led.turn_on();
        led.update().unwrap();

        led.initialize().unwrap();
        led.update().unwrap();
        assert_eq!(led.current_state(), LedState::Off);
        assert_eq!(led.current_priority(), LedPriority::Low);
        assert_eq!(led.driver().level(2), Some(false));
    }

    #[test]
    fn config_sets_pin_and_lock() {
        let clock = MockClock::new();
        let config = IndicatorConfig::default()
            .with_pin(5)
            .with_error_lock_ms(1_000);
        let mut led = LedIndicator::with_config(MockPin::new(), &clock, &config);
        led.initialize().unwrap();
        assert_eq!(led.driver().configured, [5]);

        led.set_error_state();
        led.update().unwrap();
        clock.advance(1_000);
        // Lock expired, but Low still loses to Critical
        assert!(!led.turn_off());
        assert!(led.request_state(LedState::On, LedPriority::Critical));
    }

    #[test]
    fn pin_failure_during_update_is_returned() {
        let clock = MockClock::new();
        let mut led = ready(&clock);
        led.turn_on();
        led.driver_mut().fail_writes = true;

        assert!(led.update().is_err());
        // The shown state still moved on
        assert_eq!(led.current_state(), LedState::On);
    }

    #[test]
    fn breathe_writes_analog() {
        let clock = MockClock::new();
        let mut led = ready(&clock);
        assert!(led.breathe());
        led.update().unwrap();
        assert_eq!(led.driver().last_write(), Some(PinWrite::Analog { pin: 2, duty: 0 }));

        clock.advance(20);
        led.update().unwrap();
        assert_eq!(led.driver().last_write(), Some(PinWrite::Analog { pin: 2, duty: 5 }));
    }

    #[test]
    fn snapshot_reports_error_lock() {
        let clock = MockClock::new();
        let mut led = ready(&clock);
        clock.set(1_000);
        led.set_error_state();
        led.update().unwrap();
        clock.advance(2_000);

        let snapshot = led.snapshot();
        assert_eq!(snapshot.state, LedState::Error);
        assert_eq!(snapshot.priority, LedPriority::Critical);
        assert_eq!(snapshot.since_ms, 1_000);
        assert_eq!(snapshot.error_lock.map(|l| l.remaining_ms), Some(3_000));
        assert!(snapshot.initialized);
        assert_eq!(snapshot.pin, 2);
    }

    #[test]
    fn release_returns_collaborators() {
        let clock = MockClock::new();
        let led = ready(&clock);
        let (pin, _clock) = led.release();
        assert_eq!(pin.configured, [2]);
    }

    #[test]
    fn error_display() {
        let err: IndicatorError<()> = IndicatorError::DriverNotReady;
        assert_eq!(format!("{}", err), "pin driver not ready");
        let err: IndicatorError<&str> = IndicatorError::Pin("bus");
        assert_eq!(format!("{}", err), "pin operation failed: \"bus\"");
    }
}

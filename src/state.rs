//! Indicator states, priorities, and state requests.
//!
//! This module defines the vocabulary shared by the arbitration gate and the
//! pattern renderers.
//!
//! # Request Flow
//!
//! 1. A caller asks for a [`LedState`] at some [`LedPriority`]
//! 2. The request is stamped with the time it was made, forming a [`StateRequest`]
//! 3. The arbitration gate decides whether it replaces the pending request
//! 4. The next `update()` renders it
//!
//! # Example
//!
//! ```rust
//! use wifly485::{LedPriority, LedState, StateRequest};
//!
//! let request = StateRequest::new(LedState::BlinkSlow, LedPriority::Normal, 1_000);
//! assert_eq!(request.state.half_period_ms(), Some(500));
//! assert!(LedPriority::Critical > request.priority);
//! ```

/// Visual pattern shown by the status LED.
///
/// Numeric codes are stable and match the codes used by the bridge's other
/// services when they report a state as a raw byte (see [`from_code`](Self::from_code)).
///
/// # Default
///
/// Defaults to [`Off`](Self::Off).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum LedState {
    /// LED dark.
    #[default]
    Off = 0,
    /// LED steadily lit.
    On = 1,
    /// 1 Hz blink.
    BlinkSlow = 2,
    /// 2 Hz blink.
    #[cfg_attr(feature = "serde", serde(rename = "blink_normal_2hz"))]
    BlinkNormal2Hz = 3,
    /// 3 Hz blink.
    #[cfg_attr(feature = "serde", serde(rename = "blink_normal_3hz"))]
    BlinkNormal3Hz = 4,
    /// 5 Hz blink.
    BlinkFast = 5,
    /// 10 Hz blink.
    BlinkUltraFast = 6,
    /// Triangular PWM brightness ramp.
    Breathe = 7,
    /// Fixed double-flash pattern. Holds a temporary lock against other states.
    Error = 8,
    /// 0.3 Hz blink.
    BlinkVerySlow = 9,
}

impl LedState {
    /// All states, in code order.
    pub const ALL: [LedState; 10] = [
        LedState::Off,
        LedState::On,
        LedState::BlinkSlow,
        LedState::BlinkNormal2Hz,
        LedState::BlinkNormal3Hz,
        LedState::BlinkFast,
        LedState::BlinkUltraFast,
        LedState::Breathe,
        LedState::Error,
        LedState::BlinkVerySlow,
    ];

    /// Numeric code of this state.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a state by its numeric code.
    ///
    /// # Examples
    ///
    /// ```
    /// use wifly485::LedState;
    ///
    /// assert_eq!(LedState::from_code(8), Some(LedState::Error));
    /// assert_eq!(LedState::from_code(10), None);
    /// ```
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LedState::Off),
            1 => Some(LedState::On),
            2 => Some(LedState::BlinkSlow),
            3 => Some(LedState::BlinkNormal2Hz),
            4 => Some(LedState::BlinkNormal3Hz),
            5 => Some(LedState::BlinkFast),
            6 => Some(LedState::BlinkUltraFast),
            7 => Some(LedState::Breathe),
            8 => Some(LedState::Error),
            9 => Some(LedState::BlinkVerySlow),
            _ => None,
        }
    }

    /// Half-period of the symmetric blink family, in milliseconds.
    ///
    /// Returns `None` for the states that are not plain blinks
    /// (steady, breathing and the error double flash).
    ///
    /// | State | Half-period | Frequency |
    /// |-------|-------------|-----------|
    /// | [`BlinkVerySlow`](Self::BlinkVerySlow) | 1667 ms | 0.3 Hz |
    /// | [`BlinkSlow`](Self::BlinkSlow) | 500 ms | 1 Hz |
    /// | [`BlinkNormal2Hz`](Self::BlinkNormal2Hz) | 250 ms | 2 Hz |
    /// | [`BlinkNormal3Hz`](Self::BlinkNormal3Hz) | 167 ms | 3 Hz |
    /// | [`BlinkFast`](Self::BlinkFast) | 100 ms | 5 Hz |
    /// | [`BlinkUltraFast`](Self::BlinkUltraFast) | 50 ms | 10 Hz |
    pub const fn half_period_ms(self) -> Option<u64> {
        match self {
            LedState::BlinkVerySlow => Some(1667),
            LedState::BlinkSlow => Some(500),
            LedState::BlinkNormal2Hz => Some(250),
            LedState::BlinkNormal3Hz => Some(167),
            LedState::BlinkFast => Some(100),
            LedState::BlinkUltraFast => Some(50),
            LedState::Off | LedState::On | LedState::Breathe | LedState::Error => None,
        }
    }

    /// Returns true for the states whose pin level changes over time.
    #[inline]
    pub const fn is_animated(self) -> bool {
        !matches!(self, LedState::Off | LedState::On)
    }

    /// Returns the state as a snake_case string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LedState::Off => "off",
            LedState::On => "on",
            LedState::BlinkSlow => "blink_slow",
            LedState::BlinkNormal2Hz => "blink_normal_2hz",
            LedState::BlinkNormal3Hz => "blink_normal_3hz",
            LedState::BlinkFast => "blink_fast",
            LedState::BlinkUltraFast => "blink_ultra_fast",
            LedState::Breathe => "breathe",
            LedState::Error => "error",
            LedState::BlinkVerySlow => "blink_very_slow",
        }
    }

    /// Parse a state from text input.
    ///
    /// Accepts the names produced by [`as_str`](Self::as_str) or the numeric
    /// code. Input is trimmed and case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use wifly485::LedState;
    ///
    /// assert_eq!(LedState::from_text("breathe"), Some(LedState::Breathe));
    /// assert_eq!(LedState::from_text(" ERROR "), Some(LedState::Error));
    /// assert_eq!(LedState::from_text("9"), Some(LedState::BlinkVerySlow));
    /// assert_eq!(LedState::from_text("strobe"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code);
        }
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
    }
}

impl TryFrom<u8> for LedState {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, u8> {
        Self::from_code(code).ok_or(code)
    }
}

impl From<LedState> for u8 {
    fn from(state: LedState) -> u8 {
        state.code()
    }
}

/// Priority of a state request, ordered low to high.
///
/// A request replaces the pending one only if its priority is at least the
/// priority of the state currently shown.
///
/// # Example
///
/// ```rust
/// use wifly485::LedPriority;
///
/// assert!(LedPriority::Critical > LedPriority::High);
/// assert!(LedPriority::Normal > LedPriority::Low);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum LedPriority {
    /// Background hints such as configuration mode.
    #[default]
    Low = 0,
    /// Regular connection progress.
    Normal = 1,
    /// Conditions needing user attention, such as the provisioning hotspot.
    High = 2,
    /// Faults.
    Critical = 3,
}

impl LedPriority {
    /// Returns the priority as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LedPriority::Low => "low",
            LedPriority::Normal => "normal",
            LedPriority::High => "high",
            LedPriority::Critical => "critical",
        }
    }

    /// Parse a priority from text (name or numeric level), case-insensitive.
    pub fn from_text(s: &str) -> Option<Self> {
        const ALL: [LedPriority; 4] = [
            LedPriority::Low,
            LedPriority::Normal,
            LedPriority::High,
            LedPriority::Critical,
        ];
        let s = s.trim();
        ALL.into_iter().find(|p| {
            p.as_str().eq_ignore_ascii_case(s) || s.parse::<u8>().ok() == Some(*p as u8)
        })
    }
}

/// A state request stamped with the time it was made.
///
/// The timestamp is the moment the request was accepted by the arbitration
/// gate, not the moment it was first rendered. The error lock is measured from
/// it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateRequest {
    /// Requested pattern.
    pub state: LedState,
    /// Requested priority.
    pub priority: LedPriority,
    /// Acceptance time (milliseconds since clock epoch).
    pub timestamp_ms: u64,
}

impl StateRequest {
    /// Creates a new request.
    pub const fn new(state: LedState, priority: LedPriority, timestamp_ms: u64) -> Self {
        Self {
            state,
            priority,
            timestamp_ms,
        }
    }

    /// Returns true if `other` asks for a different state or priority.
    ///
    /// Timestamps are ignored, so re-requesting the current pattern does not
    /// restart it.
    #[inline]
    pub fn differs_from(&self, other: &StateRequest) -> bool {
        self.state != other.state || self.priority != other.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_default_is_off() {
        assert_eq!(LedState::default(), LedState::Off);
    }

    #[test]
    fn state_codes_round_trip() {
        for state in LedState::ALL {
            assert_eq!(LedState::from_code(state.code()), Some(state));
            assert_eq!(LedState::try_from(u8::from(state)), Ok(state));
        }
    }

    #[test]
    fn state_codes_match_firmware_numbering() {
        assert_eq!(LedState::Off.code(), 0);
        assert_eq!(LedState::Breathe.code(), 7);
        assert_eq!(LedState::Error.code(), 8);
        assert_eq!(LedState::BlinkVerySlow.code(), 9);
    }

    #[test]
    fn state_unknown_code_rejected() {
        assert_eq!(LedState::from_code(10), None);
        assert_eq!(LedState::try_from(200), Err(200));
    }

    #[test]
    fn half_periods() {
        assert_eq!(LedState::BlinkVerySlow.half_period_ms(), Some(1667));
        assert_eq!(LedState::BlinkSlow.half_period_ms(), Some(500));
        assert_eq!(LedState::BlinkNormal2Hz.half_period_ms(), Some(250));
        assert_eq!(LedState::BlinkNormal3Hz.half_period_ms(), Some(167));
        assert_eq!(LedState::BlinkFast.half_period_ms(), Some(100));
        assert_eq!(LedState::BlinkUltraFast.half_period_ms(), Some(50));
    }

    #[test]
    fn non_blink_states_have_no_half_period() {
        for state in [LedState::Off, LedState::On, LedState::Breathe, LedState::Error] {
            assert_eq!(state.half_period_ms(), None);
        }
    }

    #[test]
    fn steady_states_not_animated() {
        assert!(!LedState::Off.is_animated());
        assert!(!LedState::On.is_animated());
        assert!(LedState::Error.is_animated());
        assert!(LedState::Breathe.is_animated());
    }

    #[test]
    fn state_from_text() {
        assert_eq!(LedState::from_text("blink_fast"), Some(LedState::BlinkFast));
        assert_eq!(LedState::from_text("Blink_Ultra_Fast"), Some(LedState::BlinkUltraFast));
        assert_eq!(LedState::from_text("\ton\n"), Some(LedState::On));
        assert_eq!(LedState::from_text("3"), Some(LedState::BlinkNormal2Hz));
        assert_eq!(LedState::from_text(""), None);
        assert_eq!(LedState::from_text("11"), None);
    }

    #[test]
    fn state_as_str_round_trips_through_from_text() {
        for state in LedState::ALL {
            assert_eq!(LedState::from_text(state.as_str()), Some(state));
        }
    }

    #[test]
    fn priority_ordering() {
        assert!(LedPriority::Low < LedPriority::Normal);
        assert!(LedPriority::Normal < LedPriority::High);
        assert!(LedPriority::High < LedPriority::Critical);
        assert_eq!(LedPriority::default(), LedPriority::Low);
    }

    #[test]
    fn priority_from_text() {
        assert_eq!(LedPriority::from_text("CRITICAL"), Some(LedPriority::Critical));
        assert_eq!(LedPriority::from_text(" normal "), Some(LedPriority::Normal));
        assert_eq!(LedPriority::from_text("2"), Some(LedPriority::High));
        assert_eq!(LedPriority::from_text("urgent"), None);
    }

    #[test]
    fn request_default_is_off_low() {
        let request = StateRequest::default();
        assert_eq!(request.state, LedState::Off);
        assert_eq!(request.priority, LedPriority::Low);
        assert_eq!(request.timestamp_ms, 0);
    }

    #[test]
    fn request_difference_ignores_timestamp() {
        let a = StateRequest::new(LedState::On, LedPriority::Normal, 0);
        let b = StateRequest::new(LedState::On, LedPriority::Normal, 5_000);
        assert!(!a.differs_from(&b));

        let c = StateRequest::new(LedState::On, LedPriority::High, 0);
        assert!(a.differs_from(&c));

        let d = StateRequest::new(LedState::Off, LedPriority::Normal, 0);
        assert!(a.differs_from(&d));
    }
}

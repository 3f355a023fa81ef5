//! Message types for remote diagnostics.
//!
//! These types are `no_std` compatible and are parsed with `serde-json-core`
//! so the same code runs on the bridge and on desktop.
//!
//! # Example
//!
//! ```
//! use wifly485::messages::IndicatorRequest;
//! use wifly485::{LedPriority, LedState};
//!
//! let json = br#"{"state": "blink_fast", "priority": "high"}"#;
//! let (req, _): (IndicatorRequest, _) = serde_json_core::from_slice(json).unwrap();
//! assert_eq!(req.state, LedState::BlinkFast);
//! assert_eq!(req.priority(), LedPriority::High);
//! ```

use serde::{Deserialize, Serialize};

use crate::conditions::BridgeCondition;
use crate::state::{LedPriority, LedState};

// ============================================================================
// Request Types
// ============================================================================

/// Request to show a state on the status LED.
///
/// # Fields
///
/// - `state`: Pattern to show
/// - `priority`: Request priority, [`Normal`](LedPriority::Normal) when omitted
///
/// # JSON Examples
///
/// ```json
/// {"state": "on"}
/// {"state": "blink_normal_2hz", "priority": "low"}
/// {"state": "error", "priority": "critical"}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorRequest {
    /// Requested pattern
    pub state: LedState,
    /// Requested priority
    #[serde(default)]
    pub priority: Option<LedPriority>,
}

impl IndicatorRequest {
    /// Create a request at an explicit priority.
    pub fn new(state: LedState, priority: LedPriority) -> Self {
        Self {
            state,
            priority: Some(priority),
        }
    }

    /// Effective priority of the request.
    pub fn priority(&self) -> LedPriority {
        self.priority.unwrap_or(LedPriority::Normal)
    }
}

/// Report of a bridge condition, shown through its standard indication.
///
/// ```json
/// {"condition": "wifi_connecting"}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionReport {
    /// Condition being reported
    pub condition: BridgeCondition,
}

// ============================================================================
// Parsing Functions (using serde-json-core for no_std compatibility)
// ============================================================================

/// Parse an indicator request from JSON bytes.
///
/// Returns `None` for malformed JSON or unknown state / priority names.
///
/// # Example
///
/// ```
/// use wifly485::messages::parse_indicator_request;
/// use wifly485::{LedPriority, LedState};
///
/// let req = parse_indicator_request(br#"{"state": "breathe"}"#).unwrap();
/// assert_eq!(req.state, LedState::Breathe);
/// assert_eq!(req.priority(), LedPriority::Normal);
///
/// assert!(parse_indicator_request(br#"{"state": "strobe"}"#).is_none());
/// ```
#[cfg(feature = "serde-json-core")]
pub fn parse_indicator_request(json: &[u8]) -> Option<IndicatorRequest> {
    serde_json_core::from_slice(json).ok().map(|(req, _)| req)
}

/// Parse a condition report from JSON bytes.
///
/// # Example
///
/// ```
/// use wifly485::messages::parse_condition_report;
/// use wifly485::BridgeCondition;
///
/// let report = parse_condition_report(br#"{"condition": "hotspot_wait"}"#).unwrap();
/// assert_eq!(report.condition, BridgeCondition::HotspotWait);
/// ```
#[cfg(feature = "serde-json-core")]
pub fn parse_condition_report(json: &[u8]) -> Option<ConditionReport> {
    serde_json_core::from_slice(json).ok().map(|(req, _)| req)
}

#[cfg(all(test, feature = "serde-json-core"))]
mod tests {
    use super::*;

    // =========================================================================
    // IndicatorRequest tests
    // =========================================================================

    #[test]
    fn test_indicator_request_new() {
        let req = IndicatorRequest::new(LedState::On, LedPriority::Low);
        assert_eq!(req.state, LedState::On);
        assert_eq!(req.priority(), LedPriority::Low);
    }

    #[test]
    fn test_indicator_request_full() {
        let json = br#"{"state": "error", "priority": "critical"}"#;
        let req = parse_indicator_request(json).unwrap();
        assert_eq!(req.state, LedState::Error);
        assert_eq!(req.priority(), LedPriority::Critical);
    }

    #[test]
    fn test_indicator_request_default_priority() {
        let req = parse_indicator_request(br#"{"state": "blink_very_slow"}"#).unwrap();
        assert_eq!(req.state, LedState::BlinkVerySlow);
        assert_eq!(req.priority, None);
        assert_eq!(req.priority(), LedPriority::Normal);
    }

    #[test]
    fn test_indicator_request_hz_names() {
        let req = parse_indicator_request(br#"{"state": "blink_normal_2hz"}"#).unwrap();
        assert_eq!(req.state, LedState::BlinkNormal2Hz);
        let req = parse_indicator_request(br#"{"state": "blink_normal_3hz"}"#).unwrap();
        assert_eq!(req.state, LedState::BlinkNormal3Hz);
    }

    #[test]
    fn test_indicator_request_names_match_as_str() {
        for state in LedState::ALL {
            let mut buf = [0u8; 64];
            let n = serde_json_core::to_slice(&IndicatorRequest::new(state, LedPriority::Low), &mut buf)
                .unwrap();
            let json = core::str::from_utf8(&buf[..n]).unwrap();
            assert!(json.contains(state.as_str()), "{}", json);
        }
    }

    #[test]
    fn test_indicator_request_rejects_garbage() {
        assert!(parse_indicator_request(b"not json").is_none());
        assert!(parse_indicator_request(br#"{"priority": "high"}"#).is_none());
        assert!(parse_indicator_request(br#"{"state": "on", "priority": "urgent"}"#).is_none());
    }

    // =========================================================================
    // ConditionReport tests
    // =========================================================================

    #[test]
    fn test_condition_report_parse() {
        for condition in BridgeCondition::ALL {
            let mut buf = [0u8; 64];
            let n = serde_json_core::to_slice(&ConditionReport { condition }, &mut buf).unwrap();
            let report = parse_condition_report(&buf[..n]).unwrap();
            assert_eq!(report.condition, condition);
        }
    }
}

//! Named bridge conditions and the LED indication for each.
//!
//! Services report what the bridge is doing; this table decides how it looks.
//!
//! | Condition | State | Priority |
//! |-----------|-------|----------|
//! | [`Idle`](BridgeCondition::Idle) | `On` | `Normal` |
//! | [`HotspotWait`](BridgeCondition::HotspotWait) | `BlinkUltraFast` | `High` |
//! | [`WifiConnecting`](BridgeCondition::WifiConnecting) | `BlinkNormal2Hz` | `Normal` |
//! | [`PeerNegotiating`](BridgeCondition::PeerNegotiating) | `BlinkNormal3Hz` | `Normal` |
//! | [`ConfigSync`](BridgeCondition::ConfigSync) | `BlinkSlow` | `Normal` |
//! | [`ConfigMode`](BridgeCondition::ConfigMode) | `BlinkVerySlow` | `Low` |
//! | [`DataTransfer`](BridgeCondition::DataTransfer) | `Breathe` | `Normal` |
//! | [`Fault`](BridgeCondition::Fault) | `Error` | `Critical` |
//!
//! ```rust
//! use wifly485::{BridgeCondition, LedPriority, LedState};
//!
//! let (state, priority) = BridgeCondition::HotspotWait.indication();
//! assert_eq!(state, LedState::BlinkUltraFast);
//! assert_eq!(priority, LedPriority::High);
//! ```

use crate::state::{LedPriority, LedState};

/// Operational condition of the bridge, as reported by its services.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BridgeCondition {
    /// Connected and idle.
    Idle,
    /// Access point up, waiting for a client to provision the device.
    HotspotWait,
    /// Station mode, joining the configured network.
    WifiConnecting,
    /// Master and slave negotiating the peer link.
    PeerNegotiating,
    /// Configuration being replicated from the master.
    ConfigSync,
    /// Provisioning / configuration mode.
    ConfigMode,
    /// RS485 traffic flowing.
    DataTransfer,
    /// Something went wrong.
    Fault,
}

impl BridgeCondition {
    /// All conditions.
    pub const ALL: [BridgeCondition; 8] = [
        BridgeCondition::Idle,
        BridgeCondition::HotspotWait,
        BridgeCondition::WifiConnecting,
        BridgeCondition::PeerNegotiating,
        BridgeCondition::ConfigSync,
        BridgeCondition::ConfigMode,
        BridgeCondition::DataTransfer,
        BridgeCondition::Fault,
    ];

    /// The state and priority used to show this condition.
    pub const fn indication(self) -> (LedState, LedPriority) {
        match self {
            BridgeCondition::Idle => (LedState::On, LedPriority::Normal),
            BridgeCondition::HotspotWait => (LedState::BlinkUltraFast, LedPriority::High),
            BridgeCondition::WifiConnecting => (LedState::BlinkNormal2Hz, LedPriority::Normal),
            BridgeCondition::PeerNegotiating => (LedState::BlinkNormal3Hz, LedPriority::Normal),
            BridgeCondition::ConfigSync => (LedState::BlinkSlow, LedPriority::Normal),
            BridgeCondition::ConfigMode => (LedState::BlinkVerySlow, LedPriority::Low),
            BridgeCondition::DataTransfer => (LedState::Breathe, LedPriority::Normal),
            BridgeCondition::Fault => (LedState::Error, LedPriority::Critical),
        }
    }

    /// Returns the condition as a snake_case string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BridgeCondition::Idle => "idle",
            BridgeCondition::HotspotWait => "hotspot_wait",
            BridgeCondition::WifiConnecting => "wifi_connecting",
            BridgeCondition::PeerNegotiating => "peer_negotiating",
            BridgeCondition::ConfigSync => "config_sync",
            BridgeCondition::ConfigMode => "config_mode",
            BridgeCondition::DataTransfer => "data_transfer",
            BridgeCondition::Fault => "fault",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_is_critical_error() {
        assert_eq!(
            BridgeCondition::Fault.indication(),
            (LedState::Error, LedPriority::Critical)
        );
    }

    #[test]
    fn only_fault_uses_error() {
        for condition in BridgeCondition::ALL {
            let (state, _) = condition.indication();
            assert_eq!(state == LedState::Error, condition == BridgeCondition::Fault);
        }
    }

    #[test]
    fn conditions_map_to_distinct_states() {
        for (i, a) in BridgeCondition::ALL.iter().enumerate() {
            for b in &BridgeCondition::ALL[i + 1..] {
                assert_ne!(a.indication().0, b.indication().0, "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn connection_progress_table() {
        assert_eq!(
            BridgeCondition::Idle.indication(),
            (LedState::On, LedPriority::Normal)
        );
        assert_eq!(
            BridgeCondition::WifiConnecting.indication(),
            (LedState::BlinkNormal2Hz, LedPriority::Normal)
        );
        assert_eq!(
            BridgeCondition::PeerNegotiating.indication(),
            (LedState::BlinkNormal3Hz, LedPriority::Normal)
        );
        assert_eq!(
            BridgeCondition::ConfigSync.indication(),
            (LedState::BlinkSlow, LedPriority::Normal)
        );
        assert_eq!(
            BridgeCondition::ConfigMode.indication(),
            (LedState::BlinkVerySlow, LedPriority::Low)
        );
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in BridgeCondition::ALL.iter().enumerate() {
            for b in &BridgeCondition::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }
}

//! State request arbitration and the error lock.
//!
//! Many parts of the bridge want to say something through the single status
//! LED: the WiFi manager while connecting, the peer link while negotiating,
//! the fault handler when something breaks. [`StateArbiter`] decides which of
//! those requests wins.
//!
//! # Rules
//!
//! Evaluated in order, first match wins:
//!
//! 1. While [`Error`](LedState::Error) is shown, non-error requests are
//!    rejected until the error lock (5000 ms by default) has elapsed since the
//!    error was accepted, whatever their priority
//! 2. Higher priority than the shown state: accepted
//! 3. Equal priority: accepted (latest wins)
//! 4. Lower priority: rejected
//!
//! Requests are compared against the state being *shown*, not against an
//! accepted request still waiting for the next `update()`.
//!
//! ```rust
//! use wifly485::arbitration::StateArbiter;
//! use wifly485::{LedPriority, LedState, StateRequest};
//!
//! let mut arbiter = StateArbiter::new(5000);
//!
//! // Fault shows the error pattern
//! let fault = StateRequest::new(LedState::Error, LedPriority::Critical, 0);
//! assert!(arbiter.submit(fault));
//! arbiter.apply_pending();
//!
//! // Even a critical non-error request is held off for 5 seconds
//! let on = StateRequest::new(LedState::On, LedPriority::Critical, 4_999);
//! assert!(!arbiter.submit(on));
//!
//! let on = StateRequest::new(LedState::On, LedPriority::Critical, 5_000);
//! assert!(arbiter.submit(on));
//! ```

use crate::state::{LedPriority, LedState, StateRequest};

/// Default time the error pattern holds off other states, in milliseconds.
pub const ERROR_LOCK_MS: u64 = 5000;

/// Outcome of evaluating a request against the shown state.
///
/// Only used for diagnostics; callers see a plain `bool`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Request outranks the shown state.
    AcceptedHigher,
    /// Request has the same priority as the shown state.
    AcceptedEqual,
    /// Request is lower priority than the shown state.
    RejectedLower,
    /// The error pattern is inside its lock window.
    RejectedErrorLock {
        /// Time left until the lock expires.
        remaining_ms: u64,
    },
}

impl Verdict {
    /// Returns true for the accepting verdicts.
    #[inline]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Verdict::AcceptedHigher | Verdict::AcceptedEqual)
    }
}

/// Holds the shown and the pending state request.
///
/// `current` is what the renderer shows; `requested` is the most recent
/// accepted request. They are reconciled by [`apply_pending`](Self::apply_pending),
/// which the engine calls once per tick.
#[derive(Clone, Debug)]
pub struct StateArbiter {
    current: StateRequest,
    requested: StateRequest,
    error_lock_ms: u64,
}

impl StateArbiter {
    /// Create a new arbiter showing `Off` at `Low` priority.
    ///
    /// # Arguments
    /// * `error_lock_ms` - How long an accepted error holds off other states
    pub fn new(error_lock_ms: u64) -> Self {
        Self {
            current: StateRequest::default(),
            requested: StateRequest::default(),
            error_lock_ms,
        }
    }

    /// Evaluate `request` against the shown state without changing anything.
    pub fn evaluate(&self, request: &StateRequest) -> Verdict {
        let now_ms = request.timestamp_ms;

        if self.current.state == LedState::Error && request.state != LedState::Error {
            let elapsed = now_ms.saturating_sub(self.current.timestamp_ms);
            if elapsed < self.error_lock_ms {
                return Verdict::RejectedErrorLock {
                    remaining_ms: self.error_lock_ms - elapsed,
                };
            }
        }

        if request.priority > self.current.priority {
            Verdict::AcceptedHigher
        } else if request.priority == self.current.priority {
            Verdict::AcceptedEqual
        } else {
            Verdict::RejectedLower
        }
    }

    /// Check if a request should be accepted.
    #[must_use]
    pub fn should_accept(&self, request: &StateRequest) -> bool {
        self.evaluate(request).is_accepted()
    }

    /// Submit a request; on acceptance it becomes the pending request.
    ///
    /// Returns true if accepted. Rejection is not an error.
    pub fn submit(&mut self, request: StateRequest) -> bool {
        let verdict = self.evaluate(&request);
        if verdict.is_accepted() {
            self.requested = request;
            log::trace!(
                "led: accepted {} ({}) at {}ms",
                request.state.as_str(),
                request.priority.as_str(),
                request.timestamp_ms
            );
            true
        } else {
            log::debug!(
                "led: ignored {} ({}) while showing {} ({}): {:?}",
                request.state.as_str(),
                request.priority.as_str(),
                self.current.state.as_str(),
                self.current.priority.as_str(),
                verdict
            );
            false
        }
    }

    /// Promote the pending request to the shown state if it differs.
    ///
    /// Returns the newly shown request when a change happened, so the caller
    /// can restart the pattern.
    pub fn apply_pending(&mut self) -> Option<StateRequest> {
        if self.requested.differs_from(&self.current) {
            self.current = self.requested;
            Some(self.current)
        } else {
            None
        }
    }

    /// Drop any pending request and show `Off` at `Low` from `now_ms`.
    ///
    /// Clears an active error lock.
    pub fn reset(&mut self, now_ms: u64) {
        let off = StateRequest::new(LedState::Off, LedPriority::Low, now_ms);
        self.current = off;
        self.requested = off;
    }

    /// The request currently shown.
    #[inline]
    pub fn current(&self) -> &StateRequest {
        &self.current
    }

    /// The most recently accepted request.
    #[inline]
    pub fn requested(&self) -> &StateRequest {
        &self.requested
    }

    /// Returns true if an accepted request has not been shown yet.
    pub fn has_pending(&self) -> bool {
        self.requested.differs_from(&self.current)
    }

    /// Configured error lock window, in milliseconds.
    #[inline]
    pub fn error_lock_ms(&self) -> u64 {
        self.error_lock_ms
    }

    /// Get the error lock status, if the lock is active at `now_ms`.
    pub fn error_lock(&self, now_ms: u64) -> Option<ErrorLockStatus> {
        if self.current.state != LedState::Error {
            return None;
        }
        let expires_ms = self.current.timestamp_ms.saturating_add(self.error_lock_ms);
        if now_ms >= expires_ms {
            return None;
        }
        Some(ErrorLockStatus {
            since_ms: self.current.timestamp_ms,
            expires_ms,
            remaining_ms: expires_ms - now_ms,
        })
    }
}

impl Default for StateArbiter {
    fn default() -> Self {
        Self::new(ERROR_LOCK_MS)
    }
}

/// Information about an active error lock.
///
/// Returned by [`StateArbiter::error_lock`] while the error pattern is
/// holding off other requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorLockStatus {
    /// When the error was accepted (milliseconds since start).
    pub since_ms: u64,
    /// When the lock expires (milliseconds since start).
    pub expires_ms: u64,
    /// Time remaining until the lock expires (milliseconds).
    pub remaining_ms: u64,
}

// ============================================================================
// Tests
// ============================================================================

//! Pattern renderers for the ten indicator states.
//!
//! Each [`LedState`] maps to a [`Pattern`] that owns its own phase
//! accumulators. A pattern is created fresh whenever its state is entered,
//! which resets all timing, and is then ticked once per superloop iteration.
//!
//! # Pattern Families
//!
//! | Pattern | States | Output |
//! |---------|--------|--------|
//! | [`Pattern::Steady`] | `Off`, `On` | One digital write on entry |
//! | [`Pattern::Blink`] | the six `Blink*` states | Digital toggle every half-period |
//! | [`Pattern::ErrorFlash`] | `Error` | 200/200/500/1100 ms double flash |
//! | [`Pattern::Breathe`] | `Breathe` | Triangular PWM ramp |
//!
//! Ticks are O(1) and produce at most one [`PinOutput`]. Timing is measured
//! from the last transition, so drift is bounded by the tick interval.
//!
//! # Example
//!
//! ```rust
//! use wifly485::patterns::{Pattern, PinOutput, BreatheTiming};
//! use wifly485::LedState;
//!
//! let (mut pattern, entry) = Pattern::start(LedState::BlinkFast, 0, BreatheTiming::default());
//! assert_eq!(entry, Some(PinOutput::Digital(false)));
//!
//! assert_eq!(pattern.tick(50), None);
//! assert_eq!(pattern.tick(100), Some(PinOutput::Digital(true)));
//! ```

use crate::state::LedState;
use crate::traits::MAX_DUTY;

/// A single write to the LED pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinOutput {
    /// Drive the pin high (`true`) or low (`false`).
    Digital(bool),
    /// Set the PWM duty, `0..=MAX_DUTY`.
    Analog(u16),
}

// ============================================================================
// Blink
// ============================================================================

/// Symmetric on/off blink with a fixed half-period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blink {
    half_period_ms: u64,
    last_toggle_ms: u64,
    lit: bool,
}

impl Blink {
    /// Start a blink at `now_ms`, initially dark.
    pub const fn new(half_period_ms: u64, now_ms: u64) -> Self {
        Self {
            half_period_ms,
            last_toggle_ms: now_ms,
            lit: false,
        }
    }

    /// Toggle if a half-period has elapsed since the last toggle.
    pub fn tick(&mut self, now_ms: u64) -> Option<PinOutput> {
        if now_ms.saturating_sub(self.last_toggle_ms) < self.half_period_ms {
            return None;
        }
        self.lit = !self.lit;
        self.last_toggle_ms = now_ms;
        Some(PinOutput::Digital(self.lit))
    }

    /// Current toggle phase (`true` = lit).
    #[inline]
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Configured half-period in milliseconds.
    #[inline]
    pub fn half_period_ms(&self) -> u64 {
        self.half_period_ms
    }
}

// ============================================================================
// Error double flash
// ============================================================================

/// One step of the error double flash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashPhase {
    /// Pin level held during this phase.
    pub lit: bool,
    /// How long the phase lasts, in milliseconds.
    pub duration_ms: u64,
}

/// Short flash, gap, long flash, long gap. 2000 ms per cycle.
pub const ERROR_PHASES: [FlashPhase; 4] = [
    FlashPhase {
        lit: true,
        duration_ms: 200,
    },
    FlashPhase {
        lit: false,
        duration_ms: 200,
    },
    FlashPhase {
        lit: true,
        duration_ms: 500,
    },
    FlashPhase {
        lit: false,
        duration_ms: 1100,
    },
];

/// Error double flash sub-state machine.
///
/// Independent of the blink half-period table; each phase is timed from its
/// own start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorFlash {
    phase: usize,
    phase_started_ms: u64,
}

impl ErrorFlash {
    /// Enter phase 0 at `now_ms`. The caller writes the phase 0 level at once.
    pub const fn new(now_ms: u64) -> Self {
        Self {
            phase: 0,
            phase_started_ms: now_ms,
        }
    }

    /// Advance to the next phase once the current one has run its course.
    pub fn tick(&mut self, now_ms: u64) -> Option<PinOutput> {
        let current = ERROR_PHASES[self.phase];
        if now_ms.saturating_sub(self.phase_started_ms) < current.duration_ms {
            return None;
        }
        self.phase = (self.phase + 1) % ERROR_PHASES.len();
        self.phase_started_ms = now_ms;
        Some(PinOutput::Digital(ERROR_PHASES[self.phase].lit))
    }

    /// Index of the active phase, `0..4`.
    #[inline]
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Pin level of the active phase.
    #[inline]
    pub fn is_lit(&self) -> bool {
        ERROR_PHASES[self.phase].lit
    }
}

// ============================================================================
// Breathe
// ============================================================================

/// Step size and step interval of the breathing ramp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreatheTiming {
    /// Duty change per step.
    pub step: u16,
    /// Time between steps, in milliseconds.
    pub interval_ms: u64,
}

impl Default for BreatheTiming {
    fn default() -> Self {
        Self {
            step: 5,
            interval_ms: 20,
        }
    }
}

/// Triangular PWM ramp between 0 and [`MAX_DUTY`].
///
/// With the default timing a full dark-bright-dark cycle takes about 4.1 s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breathe {
    timing: BreatheTiming,
    last_step_ms: u64,
    value: u16,
    rising: bool,
}

impl Breathe {
    /// Start dark and rising at `now_ms`.
    pub const fn new(timing: BreatheTiming, now_ms: u64) -> Self {
        Self {
            timing,
            last_step_ms: now_ms,
            value: 0,
            rising: true,
        }
    }

    /// Take one ramp step if the step interval has elapsed.
    ///
    /// Overshoot is clamped to the boundary and the direction reverses there,
    /// so the output never leaves `0..=MAX_DUTY`.
    pub fn tick(&mut self, now_ms: u64) -> Option<PinOutput> {
        if now_ms.saturating_sub(self.last_step_ms) < self.timing.interval_ms {
            return None;
        }
        self.last_step_ms = now_ms;

        if self.rising {
            let next = self.value.saturating_add(self.timing.step);
            if next >= MAX_DUTY {
                self.value = MAX_DUTY;
                self.rising = false;
            } else {
                self.value = next;
            }
        } else if self.value <= self.timing.step {
            self.value = 0;
            self.rising = true;
        } else {
            self.value -= self.timing.step;
        }

        Some(PinOutput::Analog(self.value))
    }

    /// Current duty value.
    #[inline]
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Ramp direction: `1` rising, `-1` falling.
    #[inline]
    pub fn direction(&self) -> i8 {
        if self.rising {
            1
        } else {
            -1
        }
    }
}

// ============================================================================
// Pattern dispatch
// ============================================================================

/// Renderer for the state currently shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// `Off` or `On`: nothing to do after entry.
    Steady {
        /// Level written on entry.
        lit: bool,
    },
    /// One of the six blink states.
    Blink(Blink),
    /// The error double flash.
    ErrorFlash(ErrorFlash),
    /// The breathing ramp.
    Breathe(Breathe),
}

impl Pattern {
    /// Create the renderer for `state` at `now_ms`.
    ///
    /// Returns the pattern together with the write that must happen on entry.
    pub fn start(state: LedState, now_ms: u64, breathe: BreatheTiming) -> (Self, Option<PinOutput>) {
        match state {
            LedState::Off => (Pattern::Steady { lit: false }, Some(PinOutput::Digital(false))),
            LedState::On => (Pattern::Steady { lit: true }, Some(PinOutput::Digital(true))),
            LedState::Error => (
                Pattern::ErrorFlash(ErrorFlash::new(now_ms)),
                Some(PinOutput::Digital(ERROR_PHASES[0].lit)),
            ),
            LedState::Breathe => (
                Pattern::Breathe(Breathe::new(breathe, now_ms)),
                Some(PinOutput::Analog(0)),
            ),
            LedState::BlinkVerySlow
            | LedState::BlinkSlow
            | LedState::BlinkNormal2Hz
            | LedState::BlinkNormal3Hz
            | LedState::BlinkFast
            | LedState::BlinkUltraFast => {
                // Blink states always carry a half-period
                let half_period = state.half_period_ms().unwrap_or(500);
                (
                    Pattern::Blink(Blink::new(half_period, now_ms)),
                    Some(PinOutput::Digital(false)),
                )
            }
        }
    }

    /// Advance the pattern to `now_ms`, returning the write to perform, if any.
    pub fn tick(&mut self, now_ms: u64) -> Option<PinOutput> {
        match self {
            Pattern::Steady { .. } => None,
            Pattern::Blink(blink) => blink.tick(now_ms),
            Pattern::ErrorFlash(flash) => flash.tick(now_ms),
            Pattern::Breathe(breathe) => breathe.tick(now_ms),
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::Steady { lit: false }
    }
}

// ============================================================================
// Tests
// ============================================================================

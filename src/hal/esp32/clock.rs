//! Uptime clock backed by `esp_timer`.

use crate::traits::Clock;

/// Monotonic uptime in milliseconds, read from the ESP-IDF high resolution
/// timer.
///
/// Zero-sized and `Copy`, so the superloop and the indicator can each hold
/// one.
///
/// ```ignore
/// use wifly485::hal::esp32::Esp32Clock;
/// use wifly485::traits::Clock;
///
/// let clock = Esp32Clock::new();
/// let boot_ms = clock.now_ms();
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Esp32Clock;

impl Esp32Clock {
    /// Handle to the system uptime timer.
    pub const fn new() -> Self {
        Self
    }

    /// Uptime in microseconds.
    pub fn uptime_us(&self) -> u64 {
        // SAFETY: esp_timer is started by the IDF before app_main
        let micros = unsafe { esp_idf_hal::sys::esp_timer_get_time() };
        u64::try_from(micros).unwrap_or(0)
    }
}

impl Clock for Esp32Clock {
    fn now_ms(&self) -> u64 {
        self.uptime_us() / 1_000
    }
}

//! Status LED on an LEDC channel.
//!
//! The LED is driven through the LEDC peripheral at 10-bit resolution so the
//! 0..=1023 duty range of the breathing ramp maps onto the hardware 1:1.
//! Blinks and steady states use 0% / 100% duty.

use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::ledc::{config::TimerConfig, LedcChannel, LedcDriver, LedcTimer, LedcTimerDriver, Resolution};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;

use crate::hal::PwmPin;
use crate::traits::PinId;

/// LEDC-backed status LED.
pub type Esp32Led<'d> = PwmPin<LedcDriver<'d>>;

/// PWM frequency in Hz (well above visible flicker)
const PWM_FREQ_HZ: u32 = 5_000;

/// PWM resolution (10-bit = 1024 steps)
const PWM_RESOLUTION: Resolution = Resolution::Bits10;

/// Set up an LEDC timer and channel driving the LED on `gpio`.
///
/// `pin_id` is the GPIO number of `gpio`, used by the indicator to address it.
/// The LED starts off.
///
/// # Example
///
/// ```ignore
/// use wifly485::hal::esp32::{pins, status_led};
///
/// let peripherals = Peripherals::take()?;
/// let led = status_led(
///     pins::STATUS_LED,
///     peripherals.pins.gpio2,
///     peripherals.ledc.timer0,
///     peripherals.ledc.channel0,
/// )?;
/// ```
///
/// # Errors
///
/// Returns an error if the LEDC timer or channel cannot be configured.
pub fn status_led<'d, T, TI, C, CI, P, PI>(
    pin_id: PinId,
    gpio: P,
    timer: T,
    channel: C,
) -> Result<Esp32Led<'d>, esp_idf_hal::sys::EspError>
where
    TI: LedcTimer + 'd,
    T: Peripheral<P = TI> + 'd,
    CI: LedcChannel<SpeedMode = TI::SpeedMode> + 'd,
    C: Peripheral<P = CI> + 'd,
    PI: OutputPin + 'd,
    P: Peripheral<P = PI> + 'd,
{
    let timer_config = TimerConfig::default()
        .frequency(PWM_FREQ_HZ.Hz())
        .resolution(PWM_RESOLUTION);
    let timer_driver = LedcTimerDriver::new(timer, &timer_config)?;

    let mut driver = LedcDriver::new(channel, timer_driver, gpio)?;
    driver.set_duty(0)?;

    log::debug!("led: LEDC channel ready on GPIO{}", pin_id);
    Ok(PwmPin::new(pin_id, driver))
}

//! ESP32 status LED bring-up for the WiFly485 bridge.
//!
//! This is the hardware entry point for the indicator. It runs a 50Hz
//! superloop that:
//! - Walks through the bridge start-up conditions on a fixed schedule
//! - Updates the status LED every tick
//! - Logs every state change and any LED write failure
//!
//! The networking and RS485 services report their conditions into the same
//! loop; until they are wired in, the schedule below stands in for them.
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! espflash flash --monitor target/riscv32imc-esp-espidf/release/esp32_main
//! ```

use esp_idf_hal::peripherals::Peripherals;
use std::thread;
use std::time::Duration;
use wifly485::hal::esp32::{pins, status_led, Esp32Clock};
use wifly485::traits::Clock;
use wifly485::{
    BridgeCondition, Config, DeviceConfig, DeviceRole, IndicatorConfig, LedIndicator,
};

/// Start-up schedule: (milliseconds after boot, condition reported).
const BOOT_SCHEDULE: [(u64, BridgeCondition); 7] = [
    (0, BridgeCondition::ConfigMode),
    (3_000, BridgeCondition::WifiConnecting),
    (8_000, BridgeCondition::PeerNegotiating),
    (12_000, BridgeCondition::ConfigSync),
    (15_000, BridgeCondition::Idle),
    (20_000, BridgeCondition::DataTransfer),
    (30_000, BridgeCondition::Idle),
];

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    // =========================================================================
    // Configuration
    // =========================================================================
    let role = option_env!("WIFLY485_ROLE")
        .and_then(DeviceRole::from_text)
        .unwrap_or_default();
    let config = Config::default()
        .with_indicator(IndicatorConfig::default().with_pin(pins::STATUS_LED))
        .with_device(DeviceConfig::for_role(role));

    log::info!(
        "{} ({}) starting",
        config.device.name,
        config.device.role.as_str()
    );

    if !config.main_loop.resolves_fastest_blink() {
        log::warn!(
            "update interval {}ms is too slow for the 10 Hz blink",
            config.main_loop.update_interval_ms
        );
    }

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Status LED (LEDC on GPIO2)
    // =========================================================================
    let led_pin = status_led(
        config.indicator.pin,
        peripherals.pins.gpio2,
        peripherals.ledc.timer0,
        peripherals.ledc.channel0,
    )?;

    let clock = Esp32Clock::new();
    let mut led = LedIndicator::with_config(led_pin, clock, &config.indicator);

    if let Err(e) = led.initialize() {
        // The bridge keeps working without visual feedback
        log::warn!("status LED unavailable: {}", e);
    }

    // =========================================================================
    // Main Loop (50Hz)
    // =========================================================================
    let boot_ms = clock.now_ms();
    let mut next_step = 0;
    let mut shown = led.current_state();

    loop {
        let uptime = clock.now_ms().saturating_sub(boot_ms);

        while let Some(&(at, condition)) = BOOT_SCHEDULE.get(next_step) {
            if uptime < at {
                break;
            }
            if !led.indicate(condition) {
                log::debug!("{} not shown over {}", condition.as_str(), shown.as_str());
            }
            next_step += 1;
        }

        if let Err(e) = led.update() {
            log::error!("status LED write failed: {}", e);
        }

        if led.current_state() != shown {
            shown = led.current_state();
            log::info!("status LED: {} ({})", shown.as_str(), led.current_priority().as_str());
        }

        // Sleep until next tick
        thread::sleep(Duration::from_millis(u64::from(
            config.main_loop.update_interval_ms,
        )));
    }
}

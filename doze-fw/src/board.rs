// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! ESP32 implementation of the sequencer platform.
//!
//! esp-hal takes wake sources as arguments of the sleep call rather than
//! keeping a registry, so the board holds the armed timer itself and hands
//! it over on sleep entry.
//!
//! The runtime ledger is clocked from the RTC slow clock. The system timer
//! behind [`Instant`] stops while light sleep gates the APB clock, so it
//! would miss the sleep span entirely.

use alloc::string::String;
use core::time::Duration;

use doze_common::{Level, Platform, RuntimeLedger, WakeCause, LED_PIN};
use embedded_hal::delay::DelayNs;
use esp_hal::gpio::{self, DriveMode, Output, OutputConfig};
use esp_hal::rtc_cntl::{sleep::TimerWakeupSource, Rtc};
use esp_hal::time::{self, Instant};
use esp_rtos::CurrentThreadHandle;

/// Delay that parks the calling thread in the esp-rtos scheduler. The idle
/// hook runs, and waits for an interrupt, until the deadline.
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        let us = u64::from(ns.div_ceil(1000));
        CurrentThreadHandle::get().delay(time::Duration::from_micros(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        CurrentThreadHandle::get().delay(time::Duration::from_millis(u64::from(ms)));
    }
}

/// Timer wake source and its timeout in microseconds.
struct ArmedTimer {
    timeout_us: u64,
    source: TimerWakeupSource,
}

pub struct Board<'d, D> {
    led: Output<'d>,
    delay: D,
    rtc: Rtc<'d>,
    armed: Option<ArmedTimer>,
    ledger: RuntimeLedger,
    /// RTC time at bring-up; the RTC keeps counting across deep sleep.
    booted_at_us: u64,
}

fn uptime_us() -> u64 {
    Instant::now().duration_since_epoch().as_micros()
}

impl<'d, D: DelayNs> Board<'d, D> {
    pub fn new(led: Output<'d>, delay: D, rtc: Rtc<'d>) -> Self {
        let booted_at_us = rtc.current_time_us();
        Self {
            led,
            delay,
            rtc,
            armed: None,
            ledger: RuntimeLedger::new(),
            booted_at_us,
        }
    }

    /// Ledger time: RTC microseconds since this power cycle began.
    fn ledger_now_us(&self) -> u64 {
        self.rtc.current_time_us().saturating_sub(self.booted_at_us)
    }

    fn check_pin(pin: u8) {
        assert_eq!(pin, LED_PIN, "only the LED pin is wired to this board");
    }
}

impl<D: DelayNs> Platform for Board<'_, D> {
    fn gpio_reset(&mut self, pin: u8) {
        Self::check_pin(pin);
        self.led.set_low();
        self.led.apply_config(&OutputConfig::default());
    }

    fn gpio_set_output(&mut self, pin: u8) {
        Self::check_pin(pin);
        self.led
            .apply_config(&OutputConfig::default().with_drive_mode(DriveMode::PushPull));
    }

    fn gpio_write(&mut self, pin: u8, level: Level) {
        Self::check_pin(pin);
        self.led.set_level(match level {
            Level::Low => gpio::Level::Low,
            Level::High => gpio::Level::High,
        });
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ledger.begin_idle(self.ledger_now_us());
        self.delay.delay_ms(ms);
        self.ledger.end_idle(self.ledger_now_us());
    }

    fn now_us(&mut self) -> u64 {
        uptime_us()
    }

    fn disarm_all_wakes(&mut self) {
        self.armed = None;
    }

    fn arm_timer_wake(&mut self, us: u64) {
        self.armed = Some(ArmedTimer {
            timeout_us: us,
            source: TimerWakeupSource::new(Duration::from_micros(us)),
        });
    }

    fn enter_light_sleep(&mut self) -> WakeCause {
        let Some(timer) = self.armed.as_ref() else {
            panic!("light sleep entered without a wake source");
        };

        let before_us = self.rtc.current_time_us().saturating_sub(self.booted_at_us);
        self.ledger.begin_idle(before_us);
        self.rtc.sleep_light(&[&timer.source]);
        let after_us = self.rtc.current_time_us().saturating_sub(self.booted_at_us);
        self.ledger.end_idle(after_us);
        let slept_us = after_us.saturating_sub(before_us);

        defmt::debug!("Board: light sleep lasted {=u64} us", slept_us);

        if slept_us >= timer.timeout_us {
            WakeCause::Timer
        } else {
            WakeCause::Other
        }
    }

    fn enter_deep_sleep(&mut self) -> ! {
        let Some(timer) = self.armed.as_ref() else {
            panic!("deep sleep entered without a wake source");
        };
        self.rtc.sleep_deep(&[&timer.source])
    }

    fn format_task_runtime_stats(&mut self, buf: &mut String) {
        let now_us = self.ledger_now_us();
        self.ledger.write_table(now_us, buf).ok();
    }

    fn print(&mut self, line: &str) {
        esp_println::println!("{}", line);
    }
}

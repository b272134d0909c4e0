// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Capability object for the MCU support layer.

use alloc::string::String;

/// Logic level driven onto a GPIO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Why the retentive sleep primitive returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeCause {
    /// The armed timer expired.
    Timer,
    /// Anything else; nothing but the timer is ever armed.
    Other,
}

/// Operations the sequencer needs from the board.
///
/// The sequencer owns the implementor for the whole power cycle, so the
/// LED pin, console and wake registry have exactly one mutator. None of the
/// operations report failure: a misbehaving primitive is a programmer error
/// and implementations may panic.
pub trait Platform {
    /// Return `pin` to its reset configuration.
    fn gpio_reset(&mut self, pin: u8);

    /// Configure `pin` as a push-pull output.
    fn gpio_set_output(&mut self, pin: u8);

    /// Drive `pin` to `level`.
    fn gpio_write(&mut self, pin: u8, level: Level);

    /// Cooperative delay. Implementations convert to their own tick
    /// granularity; rounding to the nearest tick is fine.
    fn delay_ms(&mut self, ms: u32);

    /// Monotonic microseconds since boot.
    fn now_us(&mut self) -> u64;

    /// Clear every armed wake source, whatever its kind.
    fn disarm_all_wakes(&mut self);

    /// Arm a single timer wake source firing after `us` microseconds.
    fn arm_timer_wake(&mut self, us: u64);

    /// Suspend with CPU and RAM retained. Returns on wake.
    fn enter_light_sleep(&mut self) -> WakeCause;

    /// Power down. The chip resets on wake, so this never returns.
    fn enter_deep_sleep(&mut self) -> !;

    /// Append a human-readable per-task runtime table to `buf`.
    fn format_task_runtime_stats(&mut self, buf: &mut String);

    /// Emit one line on the serial console.
    fn print(&mut self, line: &str);
}

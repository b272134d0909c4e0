// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Wake-source configuration.
//!
//! At most one wake source is armed at any time: arming always starts by
//! disarming every source of every kind, and the only source this firmware
//! ever arms is the RTC timer.

use crate::platform::Platform;

/// Light sleep timer wake, in microseconds.
pub const LIGHT_WAKE_US: u64 = 10 * 1_000_000;

/// Deep sleep timer wake, in microseconds.
pub const DEEP_WAKE_US: u64 = 5 * 1_000_000;

/// Disarm everything, then arm a single timer wake after `us`.
pub fn arm_timer<P: Platform>(platform: &mut P, us: u64) {
    platform.disarm_all_wakes();
    platform.arm_timer_wake(us);

    #[cfg(feature = "defmt")]
    defmt::debug!("Wake: timer armed for {} us", us);
}

/// Arm the timer that ends light sleep.
pub fn arm_light_wake<P: Platform>(platform: &mut P) {
    arm_timer(platform, LIGHT_WAKE_US);
}

/// Arm the timer that ends deep sleep (by reset).
pub fn arm_deep_wake<P: Platform>(platform: &mut P) {
    arm_timer(platform, DEEP_WAKE_US);
}

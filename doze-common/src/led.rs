// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! LED signalling.

use crate::platform::{Level, Platform};

/// GPIO driving the on-board LED.
pub const LED_PIN: u8 = 2;

/// Visual identity of a phase: `count` pulses of `on_ms` high, `off_ms` low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkSignature {
    pub count: u32,
    pub on_ms: u32,
    pub off_ms: u32,
}

impl BlinkSignature {
    pub const fn new(count: u32, on_ms: u32, off_ms: u32) -> Self {
        Self {
            count,
            on_ms,
            off_ms,
        }
    }

    /// Total time the pattern occupies.
    pub const fn duration_ms(&self) -> u32 {
        self.count.saturating_mul(self.on_ms.saturating_add(self.off_ms))
    }
}

/// Blink the LED `count` times. Returns after the last off period.
pub fn blink<P: Platform>(platform: &mut P, count: u32, on_ms: u32, off_ms: u32) {
    for _ in 0..count {
        platform.gpio_write(LED_PIN, Level::High);
        platform.delay_ms(on_ms);
        platform.gpio_write(LED_PIN, Level::Low);
        platform.delay_ms(off_ms);
    }
}

/// Play a [`BlinkSignature`].
pub fn signal<P: Platform>(platform: &mut P, signature: BlinkSignature) {
    blink(platform, signature.count, signature.on_ms, signature.off_ms);
}

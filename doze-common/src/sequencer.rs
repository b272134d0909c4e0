// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Top-level power-state sequencer.
//!
//! From boot the sequencer walks [`SEQUENCE`] once: Run, Light Sleep, Deep
//! Sleep. Deep sleep ends the power cycle; its timer wake resets the chip
//! and execution starts over at the boot entry, not at a particular phase.

use crate::console;
use crate::led::LED_PIN;
use crate::phase::{self, Phase, SEQUENCE};
use crate::platform::Platform;

/// Sole owner of the platform for one power cycle.
pub struct Sequencer<P: Platform> {
    platform: P,
}

impl<P: Platform> Sequencer<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Bring up the LED and run every phase in order.
    ///
    /// Takes `self` by value: once booted the sequencer cannot be invoked
    /// again within the same power cycle.
    pub fn boot(mut self) -> ! {
        self.platform.gpio_reset(LED_PIN);
        self.platform.gpio_set_output(LED_PIN);
        self.platform.print(console::BOOTED);

        for phase in SEQUENCE {
            #[cfg(feature = "defmt")]
            defmt::info!("Sequencer: entering {:?}", phase);

            self.enter(phase);
        }

        unreachable!()
    }

    fn enter(&mut self, current: Phase) {
        match current {
            Phase::Run => phase::run_phase(&mut self.platform),
            Phase::LightSleep => {
                phase::light_sleep_phase(&mut self.platform);
            }
            Phase::DeepSleep => phase::deep_sleep_phase(&mut self.platform),
        }
    }
}

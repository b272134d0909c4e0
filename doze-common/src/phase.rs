// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Power phases and their bodies.

use crate::console;
use crate::led::{self, BlinkSignature};
use crate::platform::{Platform, WakeCause};
use crate::stats::report_stats;
use crate::wake::{arm_deep_wake, arm_light_wake};
use crate::workload::simulate;

/// Idle time at the end of the run phase.
pub const RUN_IDLE_MS: u32 = 2000;

/// Time given to the console to drain before deep sleep cuts power.
pub const DEEP_SETTLE_MS: u32 = 500;

/// Two slow blinks after resuming from light sleep.
pub const LIGHT_RESUME_SIGNATURE: BlinkSignature = BlinkSignature::new(2, 500, 500);

/// Phases in execution order. Each one starts after the previous returns.
pub const SEQUENCE: [Phase; 3] = [Phase::Run, Phase::LightSleep, Phase::DeepSleep];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Run,
    LightSleep,
    DeepSleep,
}

impl Phase {
    /// Console line announcing the phase.
    pub const fn banner(self) -> &'static str {
        match self {
            Phase::Run => console::ENTER_RUN,
            Phase::LightSleep => console::ENTER_LIGHT,
            Phase::DeepSleep => console::ENTER_DEEP,
        }
    }

    /// Blink pattern played on entry.
    pub const fn signature(self) -> BlinkSignature {
        match self {
            Phase::Run => BlinkSignature::new(1, 300, 300),
            Phase::LightSleep => BlinkSignature::new(5, 200, 200),
            Phase::DeepSleep => BlinkSignature::new(3, 500, 500),
        }
    }
}

/// Blink, burn CPU, report, then idle.
pub fn run_phase<P: Platform>(platform: &mut P) {
    platform.print(Phase::Run.banner());
    led::signal(platform, Phase::Run.signature());

    let _measurement = simulate(platform);
    #[cfg(feature = "defmt")]
    defmt::debug!("Run: workload {:?}", _measurement);

    report_stats(platform).ok();
    platform.delay_ms(RUN_IDLE_MS);
}

/// Sleep retentively until the light wake timer fires, then report and
/// acknowledge with two slow blinks.
pub fn light_sleep_phase<P: Platform>(platform: &mut P) -> WakeCause {
    platform.print(Phase::LightSleep.banner());
    led::signal(platform, Phase::LightSleep.signature());

    arm_light_wake(platform);
    let cause = platform.enter_light_sleep();
    if cause != WakeCause::Timer {
        // Nothing else is armed; treat it as noise and carry on
        #[cfg(feature = "defmt")]
        defmt::warn!("Light sleep: unexpected wake cause {:?}", cause);
    }

    platform.print(console::WOKE_LIGHT);
    report_stats(platform).ok();
    led::signal(platform, LIGHT_RESUME_SIGNATURE);

    cause
}

/// Arm the deep wake timer and power down. Wake is a reset, so this never
/// returns and nothing after the sleep call runs.
pub fn deep_sleep_phase<P: Platform>(platform: &mut P) -> ! {
    platform.print(Phase::DeepSleep.banner());
    led::signal(platform, Phase::DeepSleep.signature());

    arm_deep_wake(platform);
    platform.delay_ms(DEEP_SETTLE_MS);

    platform.enter_deep_sleep()

    // A stats report after the sleep call would be dead: wake is a reset.
}

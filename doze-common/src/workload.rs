// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! CPU-bound dummy workload for the run phase.

use core::hint::black_box;

use heapless::String;

use crate::console;
use crate::platform::Platform;

/// Loop length of the dummy workload.
pub const WORKLOAD_ITERATIONS: u64 = 1_000_000;

/// Outcome of one [`simulate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    pub elapsed_us: u64,
    pub accumulator: u64,
}

/// Sum of `2 * i` for `i` in `0..iterations`.
///
/// Every step goes through [`black_box`] so the optimiser can neither fold
/// the loop into a closed form nor drop it.
pub fn accumulate(iterations: u64) -> u64 {
    let mut acc = 0u64;
    for i in 0..iterations {
        acc = black_box(acc.wrapping_add(black_box(i) * 2));
    }
    acc
}

/// Run the workload between two timestamps and print a single result line.
///
/// Never sleeps or yields.
pub fn simulate<P: Platform>(platform: &mut P) -> Measurement {
    let t0 = platform.now_us();
    let accumulator = accumulate(WORKLOAD_ITERATIONS);
    let t1 = platform.now_us();

    let measurement = Measurement {
        elapsed_us: t1.saturating_sub(t0),
        accumulator,
    };

    let mut line: String<128> = String::new();
    // 128 bytes hold the fixed text plus two u64 values
    console::write_workload_done(&mut line, measurement.elapsed_us, measurement.accumulator).ok();
    platform.print(&line);

    measurement
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Power-state sequencer for the Doze low-power demonstrator.
//!
//! This crate supports both `no_std` (embedded) and `std` (host) environments:
//! - Default: `no_std` + `alloc` for embedded targets
//! - `std` feature: Enables `std::error::Error` impls for host tools
//! - `defmt` feature: Enables `defmt` logging and `defmt::Format` derives
//!
//! The hardware is reached exclusively through the [`Platform`] trait, so the
//! whole sequence can be exercised on the host against a recording fake.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod console;
pub mod led;
pub mod phase;
pub mod platform;
pub mod sequencer;
pub mod stats;
pub mod wake;
pub mod workload;

// Re-export commonly used types
pub use console::ConsoleEvent;
pub use led::{blink, BlinkSignature, LED_PIN};
pub use phase::{Phase, SEQUENCE};
pub use platform::{Level, Platform, WakeCause};
pub use sequencer::Sequencer;
pub use stats::{report_stats, RuntimeLedger, StatsError, STATS_BUFFER_LEN};
pub use wake::{arm_deep_wake, arm_light_wake, DEEP_WAKE_US, LIGHT_WAKE_US};
pub use workload::{simulate, Measurement, WORKLOAD_ITERATIONS};

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Serial console line contract.
//!
//! The firmware emits these lines verbatim and `doze-monitor` parses them
//! back, so both sides share the constants below. Only the prefixes are
//! guaranteed; anything after them is informational.

pub const BOOTED: &str = "System booted. Configuring wake-up sources...";
pub const ENTER_RUN: &str = "Entering Run Mode...";
pub const WORKLOAD_DONE: &str = "CPU workload completed. Time taken: ";
pub const STATS_HEADER: &str = "Task Runtime Statistics:";
pub const STATS_ALLOC_FAILED: &str = "Error: Failed to allocate memory for runtime stats.";
pub const ENTER_LIGHT: &str = "Entering Light Sleep Mode...";
pub const WOKE_LIGHT: &str = "Woke up from Light Sleep.";
pub const ENTER_DEEP: &str = "Entering Deep Sleep Mode...";

const WORKLOAD_UNIT: &str = " microseconds. Result: ";

/// A recognised console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleEvent {
    Booted,
    EnterRun,
    WorkloadDone { elapsed_us: u64, result: u64 },
    StatsHeader,
    StatsAllocFailed,
    EnterLight,
    WokeLight,
    EnterDeep,
}

impl ConsoleEvent {
    /// Recognise one console line. Table rows and foreign output give `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end();

        if let Some(rest) = line.strip_prefix(WORKLOAD_DONE) {
            return parse_workload(rest);
        }

        let event = match line {
            l if l.starts_with("System booted") => Self::Booted,
            l if l.starts_with("Entering Run Mode") => Self::EnterRun,
            l if l.starts_with(STATS_HEADER) => Self::StatsHeader,
            l if l.starts_with(STATS_ALLOC_FAILED) => Self::StatsAllocFailed,
            l if l.starts_with("Entering Light Sleep Mode") => Self::EnterLight,
            l if l.starts_with("Woke up") => Self::WokeLight,
            l if l.starts_with("Entering Deep Sleep Mode") => Self::EnterDeep,
            _ => return None,
        };
        Some(event)
    }
}

fn parse_workload(rest: &str) -> Option<ConsoleEvent> {
    let (elapsed, result) = rest.split_once(WORKLOAD_UNIT)?;
    Some(ConsoleEvent::WorkloadDone {
        elapsed_us: elapsed.trim().parse().ok()?,
        result: result.trim().parse().ok()?,
    })
}

/// Write the workload completion line into `out`.
pub fn write_workload_done(
    out: &mut impl core::fmt::Write,
    elapsed_us: u64,
    result: u64,
) -> core::fmt::Result {
    write!(out, "{WORKLOAD_DONE}{elapsed_us}{WORKLOAD_UNIT}{result}")
}

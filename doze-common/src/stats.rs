// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Task runtime statistics.
//!
//! [`report_stats`] prints whatever table the platform produces.
//! [`RuntimeLedger`] is the bookkeeping a bare-metal platform without an
//! RTOS task list uses to produce one: time is split between the `main`
//! control flow and `IDLE`, which covers delays and light sleep.

use alloc::string::String;
use core::fmt;

use crate::console;
use crate::platform::Platform;

/// Minimum size of the heap buffer handed to the stats formatter.
pub const STATS_BUFFER_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatsError {
    /// The heap could not provide the stats buffer.
    Alloc,
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Alloc => f.write_str("stats buffer allocation failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatsError {}

/// Print the platform's task runtime table under [`console::STATS_HEADER`].
///
/// Allocation failure prints [`console::STATS_ALLOC_FAILED`] and returns
/// without touching the platform formatter.
pub fn report_stats<P: Platform>(platform: &mut P) -> Result<(), StatsError> {
    report_stats_with_capacity(platform, STATS_BUFFER_LEN)
}

/// [`report_stats`] with an explicit buffer capacity.
pub fn report_stats_with_capacity<P: Platform>(
    platform: &mut P,
    capacity: usize,
) -> Result<(), StatsError> {
    let mut buf = match alloc_buffer(capacity) {
        Ok(buf) => buf,
        Err(e) => {
            platform.print(console::STATS_ALLOC_FAILED);
            return Err(e);
        }
    };

    platform.format_task_runtime_stats(&mut buf);

    platform.print(console::STATS_HEADER);
    for row in buf.lines() {
        platform.print(row);
    }

    Ok(())
}

fn alloc_buffer(capacity: usize) -> Result<String, StatsError> {
    let mut buf = String::new();
    buf.try_reserve_exact(capacity).map_err(|_| StatsError::Alloc)?;
    Ok(buf)
}

/// Busy/idle accounting for a single control flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeLedger {
    idle_us: u64,
    idle_since: Option<u64>,
}

impl RuntimeLedger {
    pub const fn new() -> Self {
        Self {
            idle_us: 0,
            idle_since: None,
        }
    }

    /// Mark the start of an idle span. Nested calls keep the first start.
    pub fn begin_idle(&mut self, now_us: u64) {
        if self.idle_since.is_none() {
            self.idle_since = Some(now_us);
        }
    }

    /// Close the open idle span, if any.
    pub fn end_idle(&mut self, now_us: u64) {
        if let Some(since) = self.idle_since.take() {
            self.idle_us += now_us.saturating_sub(since);
        }
    }

    /// Idle time up to `now_us`, including an open span.
    pub fn idle_us(&self, now_us: u64) -> u64 {
        let open = self
            .idle_since
            .map_or(0, |since| now_us.saturating_sub(since));
        self.idle_us + open
    }

    /// Non-idle time up to `now_us`.
    pub fn busy_us(&self, now_us: u64) -> u64 {
        now_us.saturating_sub(self.idle_us(now_us))
    }

    /// Render the runtime table, one `name\t\tabs\t\tpercent` row per task.
    pub fn write_table(&self, now_us: u64, out: &mut impl fmt::Write) -> fmt::Result {
        let idle = self.idle_us(now_us);
        let busy = now_us.saturating_sub(idle);
        write_row(out, "main", busy, now_us)?;
        write_row(out, "IDLE", idle, now_us)
    }
}

fn write_row(out: &mut impl fmt::Write, name: &str, abs_us: u64, total_us: u64) -> fmt::Result {
    let percent = abs_us.saturating_mul(100).checked_div(total_us).unwrap_or(0);
    if percent == 0 && abs_us > 0 {
        writeln!(out, "{name}\t\t{abs_us}\t\t<1%")
    } else {
        writeln!(out, "{name}\t\t{abs_us}\t\t{percent}%")
    }
}

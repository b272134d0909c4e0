// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Power-cycle tracker fed with parsed console events.

use std::fmt;

use doze_common::phase::DEEP_SETTLE_MS;
use doze_common::workload::accumulate;
use doze_common::{ConsoleEvent, Phase, DEEP_WAKE_US, LIGHT_WAKE_US, WORKLOAD_ITERATIONS};

/// What the tracker waits for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Attached mid-cycle; everything before the next boot line is ignored.
    Sync,
    Run,
    Workload,
    LightSleep,
    Wake,
    DeepSleep,
    Reboot,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::Sync => "boot banner",
            Stage::Run => "run mode",
            Stage::Workload => "workload result",
            Stage::LightSleep => "light sleep entry",
            Stage::Wake => "light sleep wake",
            Stage::DeepSleep => "deep sleep entry",
            Stage::Reboot => "deep sleep wake (reboot)",
        };
        f.write_str(text)
    }
}

/// Something the firmware did that it should not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    OutOfOrder { expected: Stage, got: ConsoleEvent },
    WrongResult { got: u64 },
    ShortLightSleep { measured_ms: u64, min_ms: u64 },
    ShortDeepSleep { measured_ms: u64, min_ms: u64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::OutOfOrder { expected, got } => {
                write!(f, "expected {expected}, got {got:?}")
            }
            Violation::WrongResult { got } => {
                write!(f, "workload result {got}, expected {}", expected_result())
            }
            Violation::ShortLightSleep { measured_ms, min_ms } => {
                write!(f, "light sleep lasted {measured_ms} ms, expected at least {min_ms} ms")
            }
            Violation::ShortDeepSleep { measured_ms, min_ms } => {
                write!(f, "deep sleep lasted {measured_ms} ms, expected at least {min_ms} ms")
            }
        }
    }
}

/// Measurements for one complete power cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub workload_us: Option<u64>,
    pub result: Option<u64>,
    pub light_sleep_ms: Option<u64>,
    pub deep_sleep_ms: Option<u64>,
    pub stats_reports: u32,
    pub stats_failures: u32,
}

pub fn expected_result() -> u64 {
    accumulate(WORKLOAD_ITERATIONS)
}

/// Minimum span between the light sleep banner and the wake line.
pub fn min_light_span_ms() -> u64 {
    u64::from(Phase::LightSleep.signature().duration_ms()) + LIGHT_WAKE_US / 1000
}

/// Minimum span between the deep sleep banner and the next boot line.
pub fn min_deep_span_ms() -> u64 {
    u64::from(Phase::DeepSleep.signature().duration_ms() + DEEP_SETTLE_MS) + DEEP_WAKE_US / 1000
}

pub struct Tracker {
    stage: Stage,
    tolerance_ms: u64,
    expected_result: u64,
    current: CycleReport,
    entered_at_ms: Option<u64>,
    completed: Vec<CycleReport>,
    violations: Vec<Violation>,
}

impl Tracker {
    pub fn new(tolerance_ms: u64) -> Self {
        Self {
            stage: Stage::Sync,
            tolerance_ms,
            expected_result: expected_result(),
            current: CycleReport::default(),
            entered_at_ms: None,
            completed: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn completed(&self) -> &[CycleReport] {
        &self.completed
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Feed one event observed at `at_ms` (monitor clock), if timing is known.
    ///
    /// Returns the report of a cycle this event completed.
    pub fn feed(&mut self, event: ConsoleEvent, at_ms: Option<u64>) -> Option<CycleReport> {
        match event {
            ConsoleEvent::StatsHeader => {
                self.current.stats_reports += 1;
                return None;
            }
            ConsoleEvent::StatsAllocFailed => {
                self.current.stats_failures += 1;
                return None;
            }
            _ => {}
        }

        match (self.stage, event) {
            (Stage::Sync, ConsoleEvent::Booted) => {
                self.current = CycleReport::default();
                self.stage = Stage::Run;
                None
            }
            (Stage::Sync, _) => None,
            (Stage::Reboot, ConsoleEvent::Booted) => {
                if let Some(span) = self.span_since_entry(at_ms) {
                    self.current.deep_sleep_ms = Some(span);
                    self.check_span(span, min_deep_span_ms(), |measured_ms, min_ms| {
                        Violation::ShortDeepSleep { measured_ms, min_ms }
                    });
                }
                let report = std::mem::take(&mut self.current);
                self.completed.push(report.clone());
                self.stage = Stage::Run;
                Some(report)
            }
            (_, ConsoleEvent::Booted) => {
                // Reset mid-cycle: the partial cycle is discarded
                self.reject(event);
                self.current = CycleReport::default();
                self.entered_at_ms = None;
                self.stage = Stage::Run;
                None
            }
            (Stage::Run, ConsoleEvent::EnterRun) => {
                self.stage = Stage::Workload;
                None
            }
            (Stage::Workload, ConsoleEvent::WorkloadDone { elapsed_us, result }) => {
                self.current.workload_us = Some(elapsed_us);
                self.current.result = Some(result);
                if result != self.expected_result {
                    self.violations.push(Violation::WrongResult { got: result });
                }
                self.stage = Stage::LightSleep;
                None
            }
            (Stage::LightSleep, ConsoleEvent::EnterLight) => {
                self.entered_at_ms = at_ms;
                self.stage = Stage::Wake;
                None
            }
            (Stage::Wake, ConsoleEvent::WokeLight) => {
                if let Some(span) = self.span_since_entry(at_ms) {
                    self.current.light_sleep_ms = Some(span);
                    self.check_span(span, min_light_span_ms(), |measured_ms, min_ms| {
                        Violation::ShortLightSleep { measured_ms, min_ms }
                    });
                }
                self.stage = Stage::DeepSleep;
                None
            }
            (Stage::DeepSleep, ConsoleEvent::EnterDeep) => {
                self.entered_at_ms = at_ms;
                self.stage = Stage::Reboot;
                None
            }
            _ => {
                self.reject(event);
                None
            }
        }
    }

    fn reject(&mut self, got: ConsoleEvent) {
        self.violations.push(Violation::OutOfOrder {
            expected: self.stage,
            got,
        });
    }

    fn span_since_entry(&mut self, at_ms: Option<u64>) -> Option<u64> {
        let entered = self.entered_at_ms.take()?;
        Some(at_ms?.saturating_sub(entered))
    }

    fn check_span(
        &mut self,
        span: u64,
        min_ms: u64,
        violation: impl FnOnce(u64, u64) -> Violation,
    ) {
        if span.saturating_add(self.tolerance_ms) < min_ms {
            self.violations.push(violation(span, min_ms));
        }
    }
}

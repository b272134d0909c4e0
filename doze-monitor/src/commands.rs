// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command implementations for console checking.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};

use doze_common::ConsoleEvent;

use crate::source::{Read, Source};
use crate::tracker::{CycleReport, Stage, Tracker};

/// Follow a live console until `cycles` power cycles complete.
pub fn watch(mut source: Source, cycles: u32, tolerance_ms: u64, quiet: bool) -> Result<()> {
    println!("Watching {} for {} power cycle(s)", source.name(), cycles);
    println!();

    let started = Instant::now();
    let mut tracker = Tracker::new(tolerance_ms);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template(
        "{spinner:.green} [{elapsed_precise}] waiting for {msg}",
    )?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(tracker.stage().to_string());

    loop {
        let line = match source.read()? {
            Read::Line(line) => line,
            Read::Idle => continue,
            Read::Eof => break,
        };

        if !quiet {
            pb.println(&line);
        }

        let at_ms = started.elapsed().as_millis() as u64;
        let report = feed_line(&mut tracker, &line, Some(at_ms), |msg| pb.println(msg));
        if let Some(report) = report {
            pb.println(describe(tracker.completed().len(), &report));
            if tracker.completed().len() >= cycles as usize {
                break;
            }
        }
        pb.set_message(tracker.stage().to_string());
    }

    pb.finish_and_clear();

    let completed = tracker.completed().len();
    if completed < cycles as usize {
        bail!(
            "Console closed after {} of {} power cycles (waiting for {})",
            completed,
            cycles,
            tracker.stage()
        );
    }

    conclude(&tracker)
}

/// Check a captured log. Ordering and workload result only; no timing.
pub fn check(mut source: Source) -> Result<()> {
    let mut tracker = Tracker::new(0);

    loop {
        match source.read()? {
            Read::Line(line) => {
                let report = feed_line(&mut tracker, &line, None, |msg| println!("{}", msg));
                if let Some(report) = report {
                    println!("{}", describe(tracker.completed().len(), &report));
                }
            }
            Read::Idle => continue,
            Read::Eof => break,
        }
    }

    println!(
        "{}: {} complete power cycle(s), stopped waiting for {}",
        source.name(),
        tracker.completed().len(),
        tracker.stage()
    );

    if tracker.completed().is_empty() && tracker.stage() == Stage::Sync {
        bail!("No boot banner found in {}", source.name());
    }

    conclude(&tracker)
}

/// Parse and feed one line, reporting any new violation through `report`.
fn feed_line(
    tracker: &mut Tracker,
    line: &str,
    at_ms: Option<u64>,
    mut report: impl FnMut(String),
) -> Option<CycleReport> {
    let event = ConsoleEvent::parse(line)?;

    let seen = tracker.violations().len();
    let completed = tracker.feed(event, at_ms);
    for violation in &tracker.violations()[seen..] {
        report(format!("VIOLATION: {}", violation));
    }
    completed
}

fn describe(index: usize, report: &CycleReport) -> String {
    let ms = |value: Option<u64>| value.map_or_else(|| "-".to_string(), |v| format!("{} ms", v));

    let mut text = format!("Cycle {}:\n", index);
    text += &format!(
        "  Workload:     {} us (result {})\n",
        report.workload_us.map_or_else(|| "-".to_string(), |v| v.to_string()),
        report.result.map_or_else(|| "-".to_string(), |v| v.to_string()),
    );
    text += &format!("  Light sleep:  {}\n", ms(report.light_sleep_ms));
    text += &format!("  Deep sleep:   {}\n", ms(report.deep_sleep_ms));
    text += &format!(
        "  Stats:        {} report(s), {} allocation failure(s)",
        report.stats_reports, report.stats_failures
    );
    text
}

fn conclude(tracker: &Tracker) -> Result<()> {
    let violations = tracker.violations();
    if violations.is_empty() {
        println!("All power cycles behaved as expected.");
        return Ok(());
    }

    println!();
    println!("{} violation(s):", violations.len());
    for violation in violations {
        println!("  - {}", violation);
    }
    bail!("Firmware console did not follow the expected power sequence")
}

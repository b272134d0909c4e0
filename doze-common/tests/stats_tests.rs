// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Stats reporter and runtime ledger tests.

mod common;

use common::{print, without_clock, Call, FakePlatform};
use doze_common::console::{STATS_ALLOC_FAILED, STATS_HEADER};
use doze_common::stats::report_stats_with_capacity;
use doze_common::{report_stats, RuntimeLedger, StatsError};

#[test]
fn test_report_stats_prints_header_then_rows() {
    let (mut fake, trace) = FakePlatform::new();
    assert_eq!(report_stats(&mut fake), Ok(()));

    assert_eq!(
        without_clock(&trace),
        vec![
            Call::FormatStats,
            print(STATS_HEADER),
            print("main\t\t100\t\t10%"),
            print("IDLE\t\t900\t\t90%"),
        ]
    );
}

#[test]
fn test_report_stats_allocation_failure() {
    let (mut fake, trace) = FakePlatform::new();
    let result = report_stats_with_capacity(&mut fake, usize::MAX);

    assert_eq!(result, Err(StatsError::Alloc));
    assert_eq!(without_clock(&trace), vec![print(STATS_ALLOC_FAILED)]);
}

#[test]
fn test_ledger_starts_empty() {
    let ledger = RuntimeLedger::new();
    assert_eq!(ledger.idle_us(1_000), 0);
    assert_eq!(ledger.busy_us(1_000), 1_000);
}

#[test]
fn test_ledger_accumulates_idle_spans() {
    let mut ledger = RuntimeLedger::new();
    ledger.begin_idle(100);
    ledger.end_idle(400);
    ledger.begin_idle(1_000);
    ledger.end_idle(1_500);

    assert_eq!(ledger.idle_us(2_000), 800);
    assert_eq!(ledger.busy_us(2_000), 1_200);
}

#[test]
fn test_ledger_counts_open_span() {
    let mut ledger = RuntimeLedger::new();
    ledger.begin_idle(100);
    assert_eq!(ledger.idle_us(350), 250);
}

#[test]
fn test_ledger_nested_begin_keeps_first_start() {
    let mut ledger = RuntimeLedger::new();
    ledger.begin_idle(100);
    ledger.begin_idle(200);
    ledger.end_idle(300);
    ledger.end_idle(900);

    assert_eq!(ledger.idle_us(1_000), 200);
}

#[test]
fn test_ledger_table() {
    let mut ledger = RuntimeLedger::new();
    ledger.begin_idle(250);
    ledger.end_idle(1_000);

    let mut out = String::new();
    ledger.write_table(1_000, &mut out).unwrap();
    assert_eq!(out, "main\t\t250\t\t25%\nIDLE\t\t750\t\t75%\n");
}

#[test]
fn test_ledger_light_sleep_span_is_idle() {
    // Clocked from a source that keeps counting through the 10 s sleep
    let mut ledger = RuntimeLedger::new();
    ledger.begin_idle(2_000_000);
    ledger.end_idle(12_000_000);

    let mut out = String::new();
    ledger.write_table(12_500_000, &mut out).unwrap();
    assert_eq!(out, "main\t\t2500000\t\t20%\nIDLE\t\t10000000\t\t80%\n");
}

#[test]
fn test_ledger_table_small_share() {
    let mut ledger = RuntimeLedger::new();
    ledger.begin_idle(5);
    ledger.end_idle(1_000_000);

    let mut out = String::new();
    ledger.write_table(1_000_000, &mut out).unwrap();
    assert_eq!(out, "main\t\t5\t\t<1%\nIDLE\t\t999995\t\t99%\n");
}

#[test]
fn test_ledger_table_at_time_zero() {
    let ledger = RuntimeLedger::new();
    let mut out = String::new();
    ledger.write_table(0, &mut out).unwrap();
    assert_eq!(out, "main\t\t0\t\t0%\nIDLE\t\t0\t\t0%\n");
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! LED signaller tests.

mod common;

use common::{blink_calls, without_clock, Call, FakePlatform};
use doze_common::{blink, BlinkSignature, Level, Phase, LED_PIN};

fn edges(calls: &[Call]) -> Vec<Level> {
    calls
        .iter()
        .filter_map(|c| match c {
            Call::GpioWrite(pin, level) if *pin == LED_PIN => Some(*level),
            _ => None,
        })
        .collect()
}

#[test]
fn test_blink_edge_count_matches_count() {
    for count in 0..8 {
        let (mut fake, trace) = FakePlatform::new();
        blink(&mut fake, count, 10, 20);

        let levels = edges(&trace.borrow());
        assert_eq!(levels.len(), 2 * count as usize);
        for (i, level) in levels.iter().enumerate() {
            let expected = if i % 2 == 0 { Level::High } else { Level::Low };
            assert_eq!(*level, expected, "edge {i} for count {count}");
        }
    }
}

#[test]
fn test_blink_zero_is_noop() {
    let (mut fake, trace) = FakePlatform::new();
    blink(&mut fake, 0, 300, 300);
    assert!(trace.borrow().is_empty());
}

#[test]
fn test_blink_ends_with_off_delay() {
    let (mut fake, trace) = FakePlatform::new();
    blink(&mut fake, 2, 150, 250);
    assert_eq!(trace.borrow().last(), Some(&Call::DelayMs(250)));
}

#[test]
fn test_run_phase_blink_signature() {
    let (mut fake, trace) = FakePlatform::new();
    let sig = Phase::Run.signature();
    blink(&mut fake, sig.count, sig.on_ms, sig.off_ms);

    assert_eq!(
        without_clock(&trace),
        vec![
            Call::GpioWrite(2, Level::High),
            Call::DelayMs(300),
            Call::GpioWrite(2, Level::Low),
            Call::DelayMs(300),
        ]
    );
}

#[test]
fn test_phase_signatures() {
    assert_eq!(Phase::Run.signature(), BlinkSignature::new(1, 300, 300));
    assert_eq!(Phase::LightSleep.signature(), BlinkSignature::new(5, 200, 200));
    assert_eq!(Phase::DeepSleep.signature(), BlinkSignature::new(3, 500, 500));
}

#[test]
fn test_signature_duration() {
    assert_eq!(Phase::LightSleep.signature().duration_ms(), 2000);
    assert_eq!(BlinkSignature::new(0, 500, 500).duration_ms(), 0);
}

#[test]
fn test_signature_duration_saturates() {
    assert_eq!(BlinkSignature::new(u32::MAX, 1, 1).duration_ms(), u32::MAX);
    assert_eq!(BlinkSignature::new(1, u32::MAX, 1).duration_ms(), u32::MAX);
}

#[test]
fn test_blink_calls_helper_matches_blink() {
    let (mut fake, trace) = FakePlatform::new();
    blink(&mut fake, 3, 500, 500);
    assert_eq!(without_clock(&trace), blink_calls(3, 500, 500));
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Recording fake of the platform for host tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use doze_common::{Level, Platform, WakeCause};

/// One recorded platform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GpioReset(u8),
    GpioSetOutput(u8),
    GpioWrite(u8, Level),
    DelayMs(u32),
    NowUs(u64),
    DisarmAllWakes,
    ArmTimerWake(u64),
    EnterLightSleep,
    EnterDeepSleep,
    FormatStats,
    Print(String),
}

/// Panic payload raised by [`FakePlatform::enter_deep_sleep`].
#[derive(Debug)]
pub struct DeepSleepEntered;

pub type Trace = Rc<RefCell<Vec<Call>>>;

/// Platform double that appends every call to a shared trace.
///
/// The clock advances only through delays and a fixed step per `now_us`
/// read, so traces are reproducible.
pub struct FakePlatform {
    trace: Trace,
    clock_us: u64,
    step_us: u64,
    light_wake: WakeCause,
    armed: Vec<u64>,
}

impl FakePlatform {
    pub fn new() -> (Self, Trace) {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let fake = Self {
            trace: trace.clone(),
            clock_us: 0,
            step_us: 7,
            light_wake: WakeCause::Timer,
            armed: Vec::new(),
        };
        (fake, trace)
    }

    pub fn with_light_wake(mut self, cause: WakeCause) -> Self {
        self.light_wake = cause;
        self
    }

    /// Timer wakes currently armed.
    pub fn armed(&self) -> &[u64] {
        &self.armed
    }

    fn record(&self, call: Call) {
        self.trace.borrow_mut().push(call);
    }
}

impl Platform for FakePlatform {
    fn gpio_reset(&mut self, pin: u8) {
        self.record(Call::GpioReset(pin));
    }

    fn gpio_set_output(&mut self, pin: u8) {
        self.record(Call::GpioSetOutput(pin));
    }

    fn gpio_write(&mut self, pin: u8, level: Level) {
        self.record(Call::GpioWrite(pin, level));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock_us += u64::from(ms) * 1000;
        self.record(Call::DelayMs(ms));
    }

    fn now_us(&mut self) -> u64 {
        self.clock_us += self.step_us;
        self.record(Call::NowUs(self.clock_us));
        self.clock_us
    }

    fn disarm_all_wakes(&mut self) {
        self.armed.clear();
        self.record(Call::DisarmAllWakes);
    }

    fn arm_timer_wake(&mut self, us: u64) {
        self.armed.push(us);
        self.record(Call::ArmTimerWake(us));
    }

    fn enter_light_sleep(&mut self) -> WakeCause {
        assert_eq!(self.armed.len(), 1, "light sleep needs exactly one wake source");
        self.clock_us += self.armed[0];
        self.record(Call::EnterLightSleep);
        self.light_wake
    }

    fn enter_deep_sleep(&mut self) -> ! {
        assert_eq!(self.armed.len(), 1, "deep sleep needs exactly one wake source");
        self.record(Call::EnterDeepSleep);
        panic::panic_any(DeepSleepEntered)
    }

    fn format_task_runtime_stats(&mut self, buf: &mut String) {
        self.record(Call::FormatStats);
        buf.push_str("main\t\t100\t\t10%\nIDLE\t\t900\t\t90%\n");
    }

    fn print(&mut self, line: &str) {
        self.record(Call::Print(line.to_string()));
    }
}

/// Run `f`, which must end in deep sleep, and return once the sentinel
/// has been caught.
pub fn until_deep_sleep(f: impl FnOnce()) {
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    let payload = result.expect_err("deep sleep must not return");
    assert!(
        payload.downcast_ref::<DeepSleepEntered>().is_some(),
        "unexpected panic instead of deep sleep sentinel"
    );
}

/// Calls excluding clock reads, which the assertions rarely care about.
pub fn without_clock(trace: &Trace) -> Vec<Call> {
    trace
        .borrow()
        .iter()
        .filter(|c| !matches!(c, Call::NowUs(_)))
        .cloned()
        .collect()
}

/// Expected calls for `blink(count, on, off)` on the LED pin.
pub fn blink_calls(count: u32, on_ms: u32, off_ms: u32) -> Vec<Call> {
    let mut calls = Vec::new();
    for _ in 0..count {
        calls.push(Call::GpioWrite(2, Level::High));
        calls.push(Call::DelayMs(on_ms));
        calls.push(Call::GpioWrite(2, Level::Low));
        calls.push(Call::DelayMs(off_ms));
    }
    calls
}

pub fn print(line: &str) -> Call {
    Call::Print(line.to_string())
}

pub fn position(calls: &[Call], wanted: &Call) -> usize {
    calls
        .iter()
        .position(|c| c == wanted)
        .unwrap_or_else(|| panic!("{wanted:?} not found in trace"))
}

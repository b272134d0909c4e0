// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

#![no_std]
#![no_main]

extern crate alloc;

mod board;

use doze_common::{Sequencer, LED_PIN};
use esp_backtrace as _;
#[cfg(target_arch = "riscv32")]
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::{
    gpio::{Level, Output, OutputConfig},
    main,
    rtc_cntl::{reset_reason, wakeup_cause, Rtc, SocResetReason},
    system::Cpu,
    timer::timg::TimerGroup,
};
use esp_println as _;

esp_bootloader_esp_idf::esp_app_desc!();

defmt::timestamp!(
    "{=u64:us}",
    esp_hal::time::Instant::now().duration_since_epoch().as_micros()
);

/// Heap for the runtime stats buffer and the scheduler's task bookkeeping.
const HEAP_SIZE: usize = 32 * 1024;

const VERSION: &str = env!("DOZE_VERSION");

#[main]
fn main() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    esp_alloc::heap_allocator!(size: HEAP_SIZE);

    // Delays block in the scheduler; main becomes its only task
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    #[cfg(target_arch = "riscv32")]
    let sw_int = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(
        timg0.timer0,
        #[cfg(target_arch = "riscv32")]
        sw_int.software_interrupt0,
    );

    // A deep-sleep timer wake comes back through here as a reset
    let reason = reset_reason(Cpu::ProCpu).unwrap_or(SocResetReason::ChipPowerOn);
    defmt::info!("doze-fw v{=str}", VERSION);
    defmt::info!("Reset reason: {}", defmt::Debug2Format(&reason));
    defmt::info!("Wake cause: {}", defmt::Debug2Format(&wakeup_cause()));

    debug_assert_eq!(LED_PIN, 2);
    let led = Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default());
    let rtc = Rtc::new(peripherals.LPWR);

    let board = board::Board::new(led, board::ThreadDelay, rtc);
    Sequencer::new(board).boot()
}

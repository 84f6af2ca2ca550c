//! Strata - Macro Keypad Firmware
//!
//! Main firmware binary for RP2040-based macro pads: a 3x4 key grid,
//! a rotary encoder, and a 128x64 OLED, speaking USB HID to the host.
//!
//! Named after the Latin "strata" (layers) - modes are stacked on top
//! of each other at runtime, and only the topmost layer owns input and
//! display.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::spi::{self, Spi};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embedded_hal_bus::spi::ExclusiveDevice;
use ssd1306::prelude::*;
use ssd1306::Ssd1306;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use strata_core::mode::{Mode, ModeRegistry};
use strata_modes::{media, shortcuts, BaseMode, HotkeyMode, PreSelectMode, SelectMode, GRID};

mod channels;
mod sinks;
mod tasks;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

// Mode instances live for the whole run; the registry borrows them
static BASE_MODE: StaticCell<BaseMode> = StaticCell::new();
static PRESELECT_MODE: StaticCell<PreSelectMode> = StaticCell::new();
static SELECT_MODE: StaticCell<SelectMode> = StaticCell::new();
static MEDIA_MODE: StaticCell<HotkeyMode> = StaticCell::new();
static SHORTCUTS_MODE: StaticCell<HotkeyMode> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Strata firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Twelve direct-wired keys, row-major from the top left, active low
    let keys = [
        Input::new(p.PIN_1, Pull::Up),
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
    ];

    // Quadrature encoder
    let encoder_a = Input::new(p.PIN_17, Pull::Up);
    let encoder_b = Input::new(p.PIN_18, Pull::Up);

    // SSD1306 OLED on SPI1 (SCK=26, MOSI=27, CS=22, RST=23, DC=24)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 8_000_000;
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_26, p.PIN_27, spi_config);
    let cs = Output::new(p.PIN_22, Level::High);
    let reset = Output::new(p.PIN_23, Level::High);
    let dc = Output::new(p.PIN_24, Level::Low);
    let device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();
    let interface = SPIInterface::new(device, dc);
    let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();

    info!("Display wired up");

    // USB driver
    let driver = Driver::new(p.USB, Irqs);

    // Boot-time registration: the only point where the mode set changes.
    // A mode whose tables do not cover the grid is rejected here and is
    // never reachable at runtime.
    let mut registry = ModeRegistry::new(GRID);
    register(&mut registry, BASE_MODE.init(BaseMode::new()));
    register(&mut registry, PRESELECT_MODE.init(PreSelectMode::new()));
    register(&mut registry, SELECT_MODE.init(SelectMode::new()));
    register(&mut registry, MEDIA_MODE.init(media::media_mode()));
    register(&mut registry, SHORTCUTS_MODE.init(shortcuts::shortcuts_mode()));
    info!("{} modes registered", registry.len());

    // Spawn tasks
    spawner.spawn(tasks::keys_task(keys)).unwrap();
    spawner
        .spawn(tasks::encoder_task(encoder_a, encoder_b))
        .unwrap();
    spawner.spawn(tasks::usb_task(driver)).unwrap();
    spawner.spawn(tasks::display_task(display, reset)).unwrap();
    spawner.spawn(tasks::engine_task(registry)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Register a mode, logging rejections instead of halting boot
fn register(registry: &mut ModeRegistry<'static>, mode: &'static mut dyn Mode) {
    let name = mode.name();
    match registry.register(mode) {
        Ok(_) => debug!("Registered mode {}", name),
        Err(e) => error!("Mode {} rejected: {:?}", name, e),
    }
}

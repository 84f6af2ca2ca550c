//! OLED display rendering
//!
//! Drives the 128x64 SSD1306 over SPI. The layout mirrors the pad: a
//! 12-pixel title strip at the top (white with black text, like a menu
//! bar) and the 3x4 icon grid beneath it, one 16x16 cell per key.
//!
//! Drawing operations arrive from the compositor over [`DRAW_CHANNEL`];
//! queued operations are batched into a single flush.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Timer;
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::Ssd1306;

use strata_core::grid::KeyAddress;
use strata_core::icon::{Icon, ICON_SIZE};

use crate::channels::{DrawOp, DRAW_CHANNEL};

/// The pad's OLED, as wired on the reference board
pub type PadDisplay = Ssd1306<
    SPIInterface<
        ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, NoDelay>,
        Output<'static>,
    >,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// Height of the title strip in pixels
const TITLE_HEIGHT: u32 = 12;

/// Shown when no mode provides a title
const PLACEHOLDER: &str = "No Mode";

/// Horizontal origin of the icon grid
const CELL_X0: i32 = 24;

/// Horizontal pitch between cells (16 px icon + 4 px gap)
const CELL_PITCH_X: i32 = 20;

/// Vertical origin of the icon grid
const CELL_Y0: i32 = 16;

/// Vertical pitch between cells
const CELL_PITCH_Y: i32 = 16;

/// Display task: applies drawing operations and flushes frames
#[embassy_executor::task]
pub async fn display_task(mut display: PadDisplay, mut reset: Output<'static>) {
    info!("Display task started");

    // Hardware reset pulse before init
    reset.set_low();
    Timer::after_millis(10).await;
    reset.set_high();
    Timer::after_millis(10).await;

    if display.init().is_err() {
        error!("Display init failed, rendering disabled");
        return;
    }
    let _ = display.clear(BinaryColor::Off);
    draw_title(&mut display, None);
    if display.flush().is_err() {
        warn!("Display flush failed");
    }

    loop {
        // Wait for the first operation, then batch everything already
        // queued into the same flush
        let mut op = DRAW_CHANNEL.receive().await;
        loop {
            apply(&mut display, &op);
            match DRAW_CHANNEL.try_receive() {
                Ok(next) => op = next,
                Err(_) => break,
            }
        }
        if display.flush().is_err() {
            warn!("Display flush failed");
        }
    }
}

fn apply(display: &mut PadDisplay, op: &DrawOp) {
    match op {
        DrawOp::Cell { cell, icon } => draw_cell(display, *cell, icon.as_ref()),
        DrawOp::Title(title) => draw_title(display, title.as_deref()),
    }
}

fn draw_cell(display: &mut PadDisplay, cell: KeyAddress, icon: Option<&Icon>) {
    let origin = cell_origin(cell);
    let _ = Rectangle::new(origin, Size::new(ICON_SIZE as u32, ICON_SIZE as u32))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(display);
    if let Some(icon) = icon {
        let raw = ImageRaw::<BinaryColor>::new(icon.data, ICON_SIZE as u32);
        let _ = Image::new(&raw, origin).draw(display);
    }
}

fn draw_title(display: &mut PadDisplay, title: Option<&str>) {
    let text = title.unwrap_or(PLACEHOLDER);

    let _ = Rectangle::new(Point::zero(), Size::new(128, TITLE_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display);

    let style = MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::Off)
        .build();
    let width = text.len() as i32 * 6;
    let x = ((128 - width) / 2).max(0);
    let _ = Text::with_baseline(text, Point::new(x, 1), style, Baseline::Top).draw(display);
}

fn cell_origin(cell: KeyAddress) -> Point {
    Point::new(
        CELL_X0 + cell.col as i32 * CELL_PITCH_X,
        CELL_Y0 + cell.row as i32 * CELL_PITCH_Y,
    )
}

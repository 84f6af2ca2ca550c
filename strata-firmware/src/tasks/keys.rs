//! Key scanning and debouncing
//!
//! The pad's twelve keys are wired straight to GPIOs, active low. An
//! integrating debouncer samples every millisecond; a key must read the
//! same level for a few consecutive samples before its transition is
//! reported. The core only ever sees clean events.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use strata_core::event::InputEvent;
use strata_core::grid::KeyAddress;
use strata_modes::COLS;

use crate::channels::INPUT_CHANNEL;

/// Number of direct-wired keys
pub const KEY_COUNT: usize = 12;

/// Sample interval in milliseconds
const SCAN_INTERVAL_MS: u64 = 1;

/// Consecutive equal samples before a transition is accepted
const DEBOUNCE_SAMPLES: u8 = 5;

/// Key scan task: samples the key pins and emits debounced transitions
#[embassy_executor::task]
pub async fn keys_task(pins: [Input<'static>; KEY_COUNT]) {
    info!("Key scan task started");

    let mut integrators = [0u8; KEY_COUNT];
    let mut pressed = [false; KEY_COUNT];
    let mut ticker = Ticker::every(Duration::from_millis(SCAN_INTERVAL_MS));

    loop {
        ticker.next().await;

        for (i, pin) in pins.iter().enumerate() {
            // Active low: a pressed key pulls its pin to ground
            let level = pin.is_low();

            if level {
                integrators[i] = (integrators[i] + 1).min(DEBOUNCE_SAMPLES);
            } else {
                integrators[i] = integrators[i].saturating_sub(1);
            }

            let addr = KeyAddress::new((i / COLS as usize) as u8, (i % COLS as usize) as u8);
            if integrators[i] == DEBOUNCE_SAMPLES && !pressed[i] {
                pressed[i] = true;
                INPUT_CHANNEL.send(InputEvent::KeyDown(addr)).await;
            } else if integrators[i] == 0 && pressed[i] {
                pressed[i] = false;
                INPUT_CHANNEL.send(InputEvent::KeyUp(addr)).await;
            }
        }
    }
}

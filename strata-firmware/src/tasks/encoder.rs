//! Rotary encoder decoding
//!
//! Decodes the quadrature signal with a lookup table over the previous
//! and current phase pair. Invalid transitions (contact bounce) decode
//! to zero and are dropped; four valid quarter-steps in one direction
//! make a detent.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use strata_core::event::InputEvent;

use crate::channels::INPUT_CHANNEL;

/// Sample interval in milliseconds
const SAMPLE_INTERVAL_MS: u64 = 1;

/// Quarter-steps per mechanical detent
const STEPS_PER_DETENT: i8 = 4;

/// Quarter-step delta per (previous, current) phase pair
///
/// Indexed by `prev << 2 | current` with each phase as the two-bit value
/// `a << 1 | b`. Transitions that skip a phase are bounce and count as
/// zero.
const QUADRATURE_DELTAS: [i8; 16] = [
    0, -1, 1, 0, //
    1, 0, 0, -1, //
    -1, 0, 0, 1, //
    0, 1, -1, 0,
];

/// Encoder task: samples the phase pins and emits detent events
#[embassy_executor::task]
pub async fn encoder_task(a: Input<'static>, b: Input<'static>) {
    info!("Encoder task started");

    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS));
    let mut prev = phase(&a, &b);
    let mut accumulator: i8 = 0;

    loop {
        ticker.next().await;

        let current = phase(&a, &b);
        if current == prev {
            continue;
        }
        accumulator += QUADRATURE_DELTAS[(prev << 2 | current) as usize];
        prev = current;

        if accumulator >= STEPS_PER_DETENT {
            accumulator = 0;
            INPUT_CHANNEL.send(InputEvent::EncoderCw).await;
        } else if accumulator <= -STEPS_PER_DETENT {
            accumulator = 0;
            INPUT_CHANNEL.send(InputEvent::EncoderCcw).await;
        }
    }
}

fn phase(a: &Input<'_>, b: &Input<'_>) -> u8 {
    (a.is_high() as u8) << 1 | b.is_high() as u8
}

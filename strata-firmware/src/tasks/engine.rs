//! The engine task
//!
//! Runs the core engine at a fixed tick cadence. All per-tick work is
//! synchronous and non-blocking: input is drained from the channel,
//! HID reports and drawing operations are queued for their tasks, and
//! any faults the engine reports are logged here.

use defmt::*;
use embassy_time::{Duration, Ticker};

use strata_core::engine::Engine;
use strata_core::mode::ModeRegistry;
use strata_modes::base;

use crate::sinks::{ChannelDisplaySink, ChannelHidSink, ChannelKeySource};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 10;

/// Engine task: ticks the mode stack, dispatch, and composition
#[embassy_executor::task]
pub async fn engine_task(registry: ModeRegistry<'static>) {
    info!("Engine task started");

    let mut engine = match Engine::new(registry, base::NAME) {
        Ok(engine) => engine,
        Err(fault) => {
            // Without an active mode the device is useless; leave the
            // other tasks running so USB still enumerates for debugging.
            error!("Engine start failed: {:?}", fault);
            return;
        }
    };

    let mut source = ChannelKeySource;
    let mut hid = ChannelHidSink::new();
    let mut display = ChannelDisplaySink;

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;

        let report = engine.tick(TICK_INTERVAL_MS, &mut source, &mut hid, &mut display);

        for fault in &report.faults {
            warn!("Tick fault: {:?}", fault);
        }
        if report.faults_dropped > 0 {
            warn!("{} further faults dropped", report.faults_dropped);
        }
        if report.macros_cancelled > 0 {
            debug!("{} in-flight macros cancelled", report.macros_cancelled);
        }
    }
}

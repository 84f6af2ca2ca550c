//! Action dispatch and timed macro playback
//!
//! Chords and consumer keys complete within the tick they fire; macros
//! carry explicit resumption state and advance a bounded amount per
//! tick. The dispatcher also guards the host-visible keyboard state:
//! keycodes held by a cancelled or failed sequence are re-released until
//! the transport accepts them, so a mode switch can never leave keys
//! stuck down on the host.

use heapless::Vec;

use crate::action::{Action, KeySet, MacroStep};
use crate::grid::KeyAddress;
use crate::mode::RequestQueue;
use crate::traits::hid::{HidError, HidSink};

/// Maximum concurrently playing macros
pub const MAX_INFLIGHT: usize = 4;

/// A macro that is mid-playback
#[derive(Debug)]
struct InFlight {
    /// Key address the macro was dispatched from
    origin: KeyAddress,
    steps: &'static [MacroStep],
    /// Next step to execute
    cursor: usize,
    /// Remaining delay before the next step, in milliseconds
    wait_ms: u32,
    /// Keycodes currently reported down on behalf of this macro
    held: KeySet,
}

/// Resolves actions into HID output and stack requests
///
/// All playback state is explicit; given the same action and the same
/// in-flight state, dispatch produces identical HID output.
#[derive(Debug, Default)]
pub struct Dispatcher {
    inflight: Vec<InFlight, MAX_INFLIGHT>,
    /// Keycodes whose release the transport has not accepted yet
    pending_release: KeySet,
    /// A consumer release the transport has not accepted yet
    pending_consumer_release: bool,
}

impl Dispatcher {
    /// Create an idle dispatcher
    pub fn new() -> Self {
        Self {
            inflight: Vec::new(),
            pending_release: KeySet::new(),
            pending_consumer_release: false,
        }
    }

    /// Number of macros currently mid-playback
    pub fn in_flight(&self) -> usize {
        self.inflight.len()
    }

    /// Execute one action dispatched from the given key address
    ///
    /// Chord and consumer actions complete here; macro actions start
    /// playback that [`Dispatcher::tick`] advances on later ticks. A new
    /// action cancels an in-flight macro from the same address;
    /// macros from other addresses keep playing.
    pub fn run(
        &mut self,
        action: &Action,
        origin: KeyAddress,
        hid: &mut dyn HidSink,
        requests: &mut RequestQueue,
    ) -> Result<(), HidError> {
        match action {
            Action::Chord(keys) => {
                hid.send(keys)?;
                if let Err(e) = hid.release(keys) {
                    self.stash_release(keys);
                    return Err(e);
                }
                Ok(())
            }
            Action::Macro(steps) => {
                self.cancel_at(origin, hid);
                let slot = InFlight {
                    origin,
                    steps,
                    cursor: 0,
                    wait_ms: 0,
                    held: KeySet::new(),
                };
                if self.inflight.push(slot).is_err() {
                    // Playback capacity exhausted; drop the oldest macro
                    // rather than the new one.
                    let oldest = self.inflight.remove(0);
                    self.release_held(oldest.held, hid);
                    let _ = self.inflight.push(InFlight {
                        origin,
                        steps,
                        cursor: 0,
                        wait_ms: 0,
                        held: KeySet::new(),
                    });
                }
                // Run leading steps up to the first delay right away.
                let idx = self.inflight.len() - 1;
                self.advance(idx, hid)
            }
            Action::Consumer(code) => {
                hid.consumer(*code)?;
                if let Err(e) = hid.consumer_release() {
                    self.pending_consumer_release = true;
                    return Err(e);
                }
                Ok(())
            }
            Action::Stack(request) => {
                requests.request(*request);
                Ok(())
            }
        }
    }

    /// Advance in-flight macros by the elapsed tick time
    ///
    /// Returns the first transport error; a failed step keeps its cursor
    /// and is retried on the next tick.
    pub fn tick(&mut self, elapsed_ms: u32, hid: &mut dyn HidSink) -> Result<(), HidError> {
        let mut first_err = Ok(());

        self.flush_pending(hid);

        let mut idx = 0;
        while idx < self.inflight.len() {
            self.inflight[idx].wait_ms = self.inflight[idx].wait_ms.saturating_sub(elapsed_ms);
            if self.inflight[idx].wait_ms == 0 {
                if let Err(e) = self.advance(idx, hid) {
                    if first_err.is_ok() {
                        first_err = Err(e);
                    }
                }
            }
            let finished = {
                let flight = &self.inflight[idx];
                flight.cursor >= flight.steps.len() && flight.wait_ms == 0
            };
            if finished {
                let done = self.inflight.remove(idx);
                self.release_held(done.held, hid);
            } else {
                idx += 1;
            }
        }

        first_err
    }

    /// Cancel the in-flight macro dispatched from the given address
    pub fn cancel_at(&mut self, origin: KeyAddress, hid: &mut dyn HidSink) {
        if let Some(pos) = self.inflight.iter().position(|m| m.origin == origin) {
            let cancelled = self.inflight.remove(pos);
            self.release_held(cancelled.held, hid);
        }
    }

    /// Cancel all in-flight macros, releasing every held keycode
    ///
    /// Returns the number of macros cancelled.
    pub fn cancel_all(&mut self, hid: &mut dyn HidSink) -> u8 {
        let mut cancelled = 0;
        while let Some(flight) = self.inflight.pop() {
            self.release_held(flight.held, hid);
            cancelled += 1;
        }
        cancelled
    }

    /// Execute steps of one macro until its next delay or its end
    fn advance(&mut self, idx: usize, hid: &mut dyn HidSink) -> Result<(), HidError> {
        while self.inflight[idx].wait_ms == 0 {
            let flight = &self.inflight[idx];
            let Some(step) = flight.steps.get(flight.cursor) else {
                break;
            };
            match *step {
                MacroStep::Press(code) => {
                    let mut keys = KeySet::new();
                    let _ = keys.push(code);
                    hid.send(&keys)?;
                    let flight = &mut self.inflight[idx];
                    if !flight.held.contains(&code) {
                        let _ = flight.held.push(code);
                    }
                }
                MacroStep::Release(code) => {
                    let mut keys = KeySet::new();
                    let _ = keys.push(code);
                    hid.release(&keys)?;
                    self.inflight[idx].held.retain(|k| *k != code);
                }
                MacroStep::Delay(ms) => {
                    self.inflight[idx].wait_ms = ms as u32;
                }
            }
            self.inflight[idx].cursor += 1;
        }
        Ok(())
    }

    /// Release keycodes held by a finished or cancelled macro
    ///
    /// Releases the transport refuses are parked and retried each tick
    /// so the host never ends up with permanently stuck keys.
    fn release_held(&mut self, held: KeySet, hid: &mut dyn HidSink) {
        if held.is_empty() {
            return;
        }
        if hid.release(&held).is_err() {
            self.stash_release(&held);
        }
    }

    fn stash_release(&mut self, keys: &KeySet) {
        for code in keys {
            if !self.pending_release.contains(code) {
                let _ = self.pending_release.push(*code);
            }
        }
    }

    fn flush_pending(&mut self, hid: &mut dyn HidSink) {
        if !self.pending_release.is_empty() {
            let pending = self.pending_release.clone();
            if hid.release(&pending).is_ok() {
                self.pending_release.clear();
            }
        }
        if self.pending_consumer_release && hid.consumer_release().is_ok() {
            self.pending_consumer_release = false;
        }
    }
}

//! Core collaborator traits bridged onto the task channels
//!
//! The engine task owns these sink/source values and calls them
//! synchronously within a tick; they never block. A full channel maps
//! to a `Busy` error, which the engine reports and retries on a later
//! tick.

use strata_core::action::KeySet;
use strata_core::event::InputEvent;
use strata_core::grid::KeyAddress;
use strata_core::icon::Icon;
use strata_core::keys::ConsumerCode;
use strata_core::traits::display::{DisplayError, DisplaySink};
use strata_core::traits::hid::{HidError, HidSink};
use strata_core::traits::keys::KeySource;

use crate::channels::{DrawOp, HidOp, DRAW_CHANNEL, HID_CHANNEL, INPUT_CHANNEL, TITLE_LEN};

/// Drains the input channel once per tick
pub struct ChannelKeySource;

impl KeySource for ChannelKeySource {
    fn poll(&mut self) -> Option<InputEvent> {
        INPUT_CHANNEL.try_receive().ok()
    }
}

/// Builds boot keyboard reports from key set changes
///
/// The HID boot report carries the full pressed state, so this sink
/// mirrors which keycodes are currently down. State only commits when
/// the report was accepted by the channel; a refused report leaves the
/// mirror matching what the host last saw.
#[derive(Debug, Default)]
pub struct ChannelHidSink {
    modifiers: u8,
    keys: [u8; 6],
}

impl ChannelHidSink {
    /// Create a sink with no keys pressed
    pub const fn new() -> Self {
        Self {
            modifiers: 0,
            keys: [0; 6],
        }
    }

    fn apply(&self, keys: &KeySet, press: bool) -> (u8, [u8; 6]) {
        let mut modifiers = self.modifiers;
        let mut slots = self.keys;
        for code in keys {
            if code.is_modifier() {
                if press {
                    modifiers |= code.modifier_bit();
                } else {
                    modifiers &= !code.modifier_bit();
                }
            } else if press {
                if !slots.contains(&code.0) {
                    if let Some(slot) = slots.iter_mut().find(|s| **s == 0) {
                        *slot = code.0;
                    }
                    // More than six simultaneous keys exceeds the boot
                    // protocol; extras are dropped.
                }
            } else {
                for slot in slots.iter_mut() {
                    if *slot == code.0 {
                        *slot = 0;
                    }
                }
            }
        }
        (modifiers, slots)
    }

    fn commit(&mut self, modifiers: u8, keys: [u8; 6]) -> Result<(), HidError> {
        HID_CHANNEL
            .try_send(HidOp::Keyboard { modifiers, keys })
            .map_err(|_| HidError::Busy)?;
        self.modifiers = modifiers;
        self.keys = keys;
        Ok(())
    }
}

impl HidSink for ChannelHidSink {
    fn send(&mut self, keys: &KeySet) -> Result<(), HidError> {
        let (modifiers, slots) = self.apply(keys, true);
        self.commit(modifiers, slots)
    }

    fn release(&mut self, keys: &KeySet) -> Result<(), HidError> {
        let (modifiers, slots) = self.apply(keys, false);
        self.commit(modifiers, slots)
    }

    fn consumer(&mut self, code: ConsumerCode) -> Result<(), HidError> {
        HID_CHANNEL
            .try_send(HidOp::Consumer(code.0))
            .map_err(|_| HidError::Busy)
    }

    fn consumer_release(&mut self) -> Result<(), HidError> {
        HID_CHANNEL
            .try_send(HidOp::Consumer(0))
            .map_err(|_| HidError::Busy)
    }
}

/// Forwards composed cells and titles to the display task
pub struct ChannelDisplaySink;

impl DisplaySink for ChannelDisplaySink {
    fn draw(&mut self, cell: KeyAddress, icon: Option<&Icon>) -> Result<(), DisplayError> {
        DRAW_CHANNEL
            .try_send(DrawOp::Cell {
                cell,
                icon: icon.copied(),
            })
            .map_err(|_| DisplayError::Busy)
    }

    fn set_title(&mut self, title: Option<&str>) -> Result<(), DisplayError> {
        let title = title.map(|text| {
            let mut owned: heapless::String<TITLE_LEN> = heapless::String::new();
            for ch in text.chars() {
                if owned.push(ch).is_err() {
                    break;
                }
            }
            owned
        });
        DRAW_CHANNEL
            .try_send(DrawOp::Title(title))
            .map_err(|_| DisplayError::Busy)
    }
}

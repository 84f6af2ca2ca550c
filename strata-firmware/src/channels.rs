//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.
//! The engine task drains and fills these without blocking; the
//! hardware tasks block on their ends.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

use strata_core::event::InputEvent;
use strata_core::grid::KeyAddress;
use strata_core::icon::Icon;

/// Channel capacity for debounced input events
const INPUT_CHANNEL_SIZE: usize = 16;

/// Channel capacity for outgoing HID reports
const HID_CHANNEL_SIZE: usize = 16;

/// Channel capacity for display drawing operations
const DRAW_CHANNEL_SIZE: usize = 32;

/// Maximum title length carried to the display task
pub const TITLE_LEN: usize = 24;

/// One ready-made HID report for the USB task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidOp {
    /// Full keyboard boot report: modifier byte plus up to six keycodes
    Keyboard { modifiers: u8, keys: [u8; 6] },
    /// Consumer-control usage; 0 releases all consumer keys
    Consumer(u16),
}

/// One drawing operation for the display task
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// Draw an icon (or blank) into a key cell
    Cell {
        cell: KeyAddress,
        icon: Option<Icon>,
    },
    /// Update the title strip; `None` shows the placeholder
    Title(Option<String<TITLE_LEN>>),
}

/// Debounced key and encoder events from the scan tasks
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// HID reports from the engine to the USB task
pub static HID_CHANNEL: Channel<CriticalSectionRawMutex, HidOp, HID_CHANNEL_SIZE> = Channel::new();

/// Drawing operations from the engine to the display task
pub static DRAW_CHANNEL: Channel<CriticalSectionRawMutex, DrawOp, DRAW_CHANNEL_SIZE> =
    Channel::new();

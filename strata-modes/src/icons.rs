//! Built-in icon bitmaps
//!
//! All icons are 16x16, 1 bpp, row-major with the MSB on the left, two
//! bytes per row. They live in flash and are referenced by pointer, so
//! sharing an icon between modes costs nothing.

use strata_core::icon::{Icon, ICON_BYTES};

/// Three stacked chevrons, marking the layer/mode-select key
pub const LAYERS: Icon = Icon::new("layers", &LAYERS_BITS);

/// Play triangle with pause bars
pub const PLAY_PAUSE: Icon = Icon::new("play-pause", &PLAY_PAUSE_BITS);

/// Solid stop square
pub const STOP: Icon = Icon::new("stop", &STOP_BITS);

/// Skip to next track
pub const NEXT_TRACK: Icon = Icon::new("next", &NEXT_TRACK_BITS);

/// Skip to previous track
pub const PREVIOUS_TRACK: Icon = Icon::new("previous", &PREVIOUS_TRACK_BITS);

/// Terminal window with prompt
pub const TERMINAL: Icon = Icon::new("terminal", &TERMINAL_BITS);

/// Clipboard, for the copy/paste macro
pub const CLIPBOARD: Icon = Icon::new("clipboard", &CLIPBOARD_BITS);

/// Padlock, for the lock-session chord
pub const LOCK: Icon = Icon::new("lock", &LOCK_BITS);

/// Camera, for the screenshot chord
pub const CAMERA: Icon = Icon::new("camera", &CAMERA_BITS);

/// Checkmark, marking the confirm key in the mode selection
pub const CHECK: Icon = Icon::new("check", &CHECK_BITS);

/// Hold-to-confirm progress bar, four fill stages
pub const PROGRESS: [Icon; 4] = [
    Icon::new("progress-1", &PROGRESS_1_BITS),
    Icon::new("progress-2", &PROGRESS_2_BITS),
    Icon::new("progress-3", &PROGRESS_3_BITS),
    Icon::new("progress-4", &PROGRESS_4_BITS),
];

macro_rules! rows {
    ($($row:expr),* $(,)?) => {{
        let rows: [u16; 16] = [$($row),*];
        let mut bytes = [0u8; ICON_BYTES];
        let mut i = 0;
        while i < 16 {
            bytes[i * 2] = (rows[i] >> 8) as u8;
            bytes[i * 2 + 1] = (rows[i] & 0xFF) as u8;
            i += 1;
        }
        bytes
    }};
}

static LAYERS_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0180, 0x0660, 0x1818, 0x6006, 0x0180, 0x0660, 0x1818,
    0x6006, 0x0180, 0x0660, 0x1818, 0x6006, 0x0000, 0x0000, 0x0000,
];

static PLAY_PAUSE_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0000, 0x1000, 0x1800, 0x1C36, 0x1E36, 0x1F36, 0x1FB6,
    0x1FB6, 0x1F36, 0x1E36, 0x1C36, 0x1800, 0x1000, 0x0000, 0x0000,
];

static STOP_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0000, 0x0000, 0x0000, 0x0FF0, 0x0FF0, 0x0FF0, 0x0FF0,
    0x0FF0, 0x0FF0, 0x0FF0, 0x0FF0, 0x0000, 0x0000, 0x0000, 0x0000,
];

static NEXT_TRACK_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0000, 0x0000, 0x0000, 0x420C, 0x630C, 0x738C, 0x7BCC,
    0x7BCC, 0x738C, 0x630C, 0x420C, 0x0000, 0x0000, 0x0000, 0x0000,
];

static PREVIOUS_TRACK_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0000, 0x0000, 0x0000, 0x3042, 0x30C6, 0x31CE, 0x33DE,
    0x33DE, 0x31CE, 0x30C6, 0x3042, 0x0000, 0x0000, 0x0000, 0x0000,
];

static TERMINAL_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0000, 0x3FFC, 0x2004, 0x3FFC, 0x2004, 0x2804, 0x2404,
    0x2204, 0x2404, 0x2804, 0x23E4, 0x2004, 0x3FFC, 0x0000, 0x0000,
];

static CLIPBOARD_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x07E0, 0x1FF8, 0x1008, 0x1008, 0x13C8, 0x1008, 0x13C8,
    0x1008, 0x13C8, 0x1008, 0x1008, 0x1008, 0x1FF8, 0x0000, 0x0000,
];

static LOCK_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x03C0, 0x0660, 0x0C30, 0x0C30, 0x0C30, 0x1FF8, 0x1FF8,
    0x1FF8, 0x1E78, 0x1E78, 0x1FF8, 0x1FF8, 0x1FF8, 0x0000, 0x0000,
];

static CAMERA_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0000, 0x0000, 0x0000, 0x0E00, 0x3FFC, 0x2004, 0x23C4,
    0x2424, 0x2424, 0x23C4, 0x2004, 0x3FFC, 0x0000, 0x0000, 0x0000,
];

static CHECK_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0000, 0x0000, 0x0000, 0x0006, 0x000C, 0x0018, 0x4030,
    0x6060, 0x30C0, 0x1980, 0x0F00, 0x0600, 0x0000, 0x0000, 0x0000,
];

static PROGRESS_1_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x7FFE, 0x7802,
    0x7802, 0x7FFE, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
];

static PROGRESS_2_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x7FFE, 0x7F02,
    0x7F02, 0x7FFE, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
];

static PROGRESS_3_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x7FFE, 0x7FE2,
    0x7FE2, 0x7FFE, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
];

static PROGRESS_4_BITS: [u8; ICON_BYTES] = rows![
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x7FFE, 0x7FFE,
    0x7FFE, 0x7FFE, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
];

//! USB HID usage codes
//!
//! Thin newtypes over the raw HID usage IDs so keyboard keycodes and
//! consumer-control codes cannot be mixed up at a call site. Only the
//! usages a macro pad actually binds are named here; any other usage
//! can still be constructed from its raw value.

/// USB HID keyboard usage ID (usage page 0x07)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Keycode(pub u8);

impl Keycode {
    pub const A: Self = Self(0x04);
    pub const B: Self = Self(0x05);
    pub const C: Self = Self(0x06);
    pub const D: Self = Self(0x07);
    pub const E: Self = Self(0x08);
    pub const F: Self = Self(0x09);
    pub const G: Self = Self(0x0A);
    pub const H: Self = Self(0x0B);
    pub const I: Self = Self(0x0C);
    pub const J: Self = Self(0x0D);
    pub const K: Self = Self(0x0E);
    pub const L: Self = Self(0x0F);
    pub const M: Self = Self(0x10);
    pub const N: Self = Self(0x11);
    pub const O: Self = Self(0x12);
    pub const P: Self = Self(0x13);
    pub const Q: Self = Self(0x14);
    pub const R: Self = Self(0x15);
    pub const S: Self = Self(0x16);
    pub const T: Self = Self(0x17);
    pub const U: Self = Self(0x18);
    pub const V: Self = Self(0x19);
    pub const W: Self = Self(0x1A);
    pub const X: Self = Self(0x1B);
    pub const Y: Self = Self(0x1C);
    pub const Z: Self = Self(0x1D);

    pub const NUM_1: Self = Self(0x1E);
    pub const NUM_2: Self = Self(0x1F);
    pub const NUM_3: Self = Self(0x20);
    pub const NUM_4: Self = Self(0x21);
    pub const NUM_5: Self = Self(0x22);
    pub const NUM_6: Self = Self(0x23);
    pub const NUM_7: Self = Self(0x24);
    pub const NUM_8: Self = Self(0x25);
    pub const NUM_9: Self = Self(0x26);
    pub const NUM_0: Self = Self(0x27);

    pub const ENTER: Self = Self(0x28);
    pub const ESCAPE: Self = Self(0x29);
    pub const BACKSPACE: Self = Self(0x2A);
    pub const TAB: Self = Self(0x2B);
    pub const SPACE: Self = Self(0x2C);

    pub const F1: Self = Self(0x3A);
    pub const F2: Self = Self(0x3B);
    pub const F3: Self = Self(0x3C);
    pub const F4: Self = Self(0x3D);
    pub const F5: Self = Self(0x3E);
    pub const F11: Self = Self(0x44);
    pub const F12: Self = Self(0x45);

    pub const PRINT_SCREEN: Self = Self(0x46);
    pub const DELETE: Self = Self(0x4C);

    pub const RIGHT_ARROW: Self = Self(0x4F);
    pub const LEFT_ARROW: Self = Self(0x50);
    pub const DOWN_ARROW: Self = Self(0x51);
    pub const UP_ARROW: Self = Self(0x52);

    // Modifiers occupy the dedicated 0xE0..=0xE7 usage range
    pub const LEFT_CTRL: Self = Self(0xE0);
    pub const LEFT_SHIFT: Self = Self(0xE1);
    pub const LEFT_ALT: Self = Self(0xE2);
    pub const LEFT_GUI: Self = Self(0xE3);
    pub const RIGHT_CTRL: Self = Self(0xE4);
    pub const RIGHT_SHIFT: Self = Self(0xE5);
    pub const RIGHT_ALT: Self = Self(0xE6);
    pub const RIGHT_GUI: Self = Self(0xE7);

    /// Check if this usage is a modifier key
    pub const fn is_modifier(&self) -> bool {
        self.0 >= 0xE0 && self.0 <= 0xE7
    }

    /// Bit of this key in the HID report modifier byte
    ///
    /// Returns 0 for non-modifier keys.
    pub const fn modifier_bit(&self) -> u8 {
        if self.is_modifier() {
            1 << (self.0 - 0xE0)
        } else {
            0
        }
    }
}

/// USB HID consumer-control usage ID (usage page 0x0C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerCode(pub u16);

impl ConsumerCode {
    pub const PLAY_PAUSE: Self = Self(0x00CD);
    pub const SCAN_NEXT_TRACK: Self = Self(0x00B5);
    pub const SCAN_PREVIOUS_TRACK: Self = Self(0x00B6);
    pub const STOP: Self = Self(0x00B7);
    pub const MUTE: Self = Self(0x00E2);
    pub const VOLUME_INCREMENT: Self = Self(0x00E9);
    pub const VOLUME_DECREMENT: Self = Self(0x00EA);
    pub const BRIGHTNESS_INCREMENT: Self = Self(0x006F);
    pub const BRIGHTNESS_DECREMENT: Self = Self(0x0070);
}

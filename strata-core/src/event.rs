//! Debounced input events
//!
//! Events arrive from the key-scan and encoder stages already debounced;
//! the core only ever sees clean transitions.

use crate::grid::KeyAddress;

/// A discrete, debounced input transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Key at the given address was pressed
    KeyDown(KeyAddress),
    /// Key at the given address was released
    KeyUp(KeyAddress),
    /// Encoder rotated clockwise (1 detent)
    EncoderCw,
    /// Encoder rotated counter-clockwise (1 detent)
    EncoderCcw,
}

impl InputEvent {
    /// Returns true if this is an encoder rotation event
    pub fn is_rotation(&self) -> bool {
        matches!(self, InputEvent::EncoderCw | InputEvent::EncoderCcw)
    }

    /// Returns the rotation direction as a signed delta (-1, 0, or +1)
    pub fn rotation_delta(&self) -> i8 {
        match self {
            InputEvent::EncoderCw => 1,
            InputEvent::EncoderCcw => -1,
            _ => 0,
        }
    }

    /// Returns the key address for key events
    pub fn key_address(&self) -> Option<KeyAddress> {
        match self {
            InputEvent::KeyDown(addr) | InputEvent::KeyUp(addr) => Some(*addr),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_delta() {
        assert_eq!(InputEvent::EncoderCw.rotation_delta(), 1);
        assert_eq!(InputEvent::EncoderCcw.rotation_delta(), -1);
        assert_eq!(InputEvent::KeyDown(KeyAddress::new(0, 0)).rotation_delta(), 0);
    }

    #[test]
    fn test_key_address() {
        let addr = KeyAddress::new(2, 1);
        assert_eq!(InputEvent::KeyDown(addr).key_address(), Some(addr));
        assert_eq!(InputEvent::KeyUp(addr).key_address(), Some(addr));
        assert_eq!(InputEvent::EncoderCw.key_address(), None);
    }
}

//! Actions bound to keys
//!
//! An action is the host-visible effect of a key under a given mode: a
//! chorded shortcut, a timed macro, a consumer-control key, or a mode
//! stack mutation. Tables store a `Binding` per cell so a key can react
//! to both its press and its release edge.

use heapless::Vec;

use crate::keys::{ConsumerCode, Keycode};

/// Maximum keycodes in one chord (modifiers included)
pub const MAX_CHORD: usize = 8;

/// One chord's worth of keycodes
pub type KeySet = Vec<Keycode, MAX_CHORD>;

/// One step of a timed macro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroStep {
    /// Report the keycode as held down
    Press(Keycode),
    /// Report the keycode as released
    Release(Keycode),
    /// Wait before the next step, in milliseconds
    Delay(u16),
}

/// A mode stack mutation requested by an action or a mode hook
///
/// Modes are addressed by registry name, so an unregistered target is a
/// configuration error caught when the request is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StackRequest {
    /// Push the named mode on top of the stack
    Push(&'static str),
    /// Remove the top mode, re-activating the one beneath
    Pop,
    /// Replace the top mode without transiently activating the one beneath
    Replace(&'static str),
    /// Clear the stack and leave only the named mode
    Reset(&'static str),
}

/// The effect bound to one key edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// All keycodes reported down, then all released, as one unit
    Chord(KeySet),
    /// Timed key-down/key-up steps, played back across ticks
    Macro(&'static [MacroStep]),
    /// A consumer-control press, released immediately
    Consumer(ConsumerCode),
    /// A mode stack mutation
    Stack(StackRequest),
}

impl Action {
    /// Build a chord action from a keycode slice
    ///
    /// Codes beyond [`MAX_CHORD`] are silently dropped; chords that long
    /// exceed what a HID boot report can express anyway.
    pub fn chord(codes: &[Keycode]) -> Self {
        let mut set = KeySet::new();
        for code in codes.iter().take(MAX_CHORD) {
            let _ = set.push(*code);
        }
        Action::Chord(set)
    }
}

/// Press and release effects for one key cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    /// Action fired on the key-down edge
    pub press: Option<Action>,
    /// Action fired on the key-up edge
    pub release: Option<Action>,
}

impl Binding {
    /// Binding that fires only on key-down
    pub fn on_press(action: Action) -> Self {
        Self {
            press: Some(action),
            release: None,
        }
    }

    /// Binding that fires only on key-up
    pub fn on_release(action: Action) -> Self {
        Self {
            press: None,
            release: Some(action),
        }
    }

    /// Action for the given edge
    pub fn for_edge(&self, pressed: bool) -> Option<&Action> {
        if pressed {
            self.press.as_ref()
        } else {
            self.release.as_ref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_builder() {
        let action = Action::chord(&[Keycode::LEFT_CTRL, Keycode::LEFT_ALT, Keycode::T]);
        match action {
            Action::Chord(set) => {
                assert_eq!(set.len(), 3);
                assert_eq!(set[0], Keycode::LEFT_CTRL);
                assert_eq!(set[2], Keycode::T);
            }
            _ => panic!("expected chord"),
        }
    }

    #[test]
    fn test_binding_edges() {
        let binding = Binding::on_press(Action::chord(&[Keycode::A]));
        assert!(binding.for_edge(true).is_some());
        assert!(binding.for_edge(false).is_none());

        let binding = Binding::on_release(Action::Stack(StackRequest::Pop));
        assert!(binding.for_edge(true).is_none());
        assert_eq!(
            binding.for_edge(false),
            Some(&Action::Stack(StackRequest::Pop))
        );
    }
}

//! Desktop shortcut hotkeys

use strata_core::action::{Action, MacroStep};
use strata_core::grid::KeyAddress;
use strata_core::keys::Keycode;

use crate::hotkeys::HotkeyMode;
use crate::icons;
use crate::GRID;

/// Registry name of the shortcuts mode
pub const NAME: &str = "shortcuts";

/// Copy the selection, give the focused application a moment, paste it
static DUPLICATE: [MacroStep; 9] = [
    MacroStep::Press(Keycode::LEFT_CTRL),
    MacroStep::Press(Keycode::C),
    MacroStep::Release(Keycode::C),
    MacroStep::Delay(150),
    MacroStep::Press(Keycode::V),
    MacroStep::Release(Keycode::V),
    MacroStep::Press(Keycode::V),
    MacroStep::Release(Keycode::V),
    MacroStep::Release(Keycode::LEFT_CTRL),
];

/// Desktop shortcuts: terminal, screenshot, session lock, and a
/// duplicate-selection macro
pub fn shortcuts_mode() -> HotkeyMode {
    HotkeyMode::new(NAME, Some("Shortcuts"), &GRID)
        .press(
            KeyAddress::new(2, 0),
            Action::chord(&[Keycode::LEFT_CTRL, Keycode::LEFT_ALT, Keycode::T]),
        )
        .icon(KeyAddress::new(2, 0), icons::TERMINAL)
        .press(
            KeyAddress::new(2, 1),
            Action::chord(&[Keycode::LEFT_GUI, Keycode::LEFT_SHIFT, Keycode::S]),
        )
        .icon(KeyAddress::new(2, 1), icons::CAMERA)
        .press(
            KeyAddress::new(2, 2),
            Action::chord(&[Keycode::LEFT_GUI, Keycode::L]),
        )
        .icon(KeyAddress::new(2, 2), icons::LOCK)
        .press(KeyAddress::new(2, 3), Action::Macro(&DUPLICATE))
        .icon(KeyAddress::new(2, 3), icons::CLIPBOARD)
}

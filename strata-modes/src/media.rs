//! Media transport hotkeys

use strata_core::action::Action;
use strata_core::grid::KeyAddress;
use strata_core::keys::ConsumerCode;

use crate::hotkeys::HotkeyMode;
use crate::icons;
use crate::GRID;

/// Registry name of the media mode
pub const NAME: &str = "media";

/// Transport controls on the middle row: previous, play/pause, stop,
/// next
pub fn media_mode() -> HotkeyMode {
    HotkeyMode::new(NAME, Some("Media"), &GRID)
        .press(
            KeyAddress::new(1, 0),
            Action::Consumer(ConsumerCode::SCAN_PREVIOUS_TRACK),
        )
        .icon(KeyAddress::new(1, 0), icons::PREVIOUS_TRACK)
        .press(
            KeyAddress::new(1, 1),
            Action::Consumer(ConsumerCode::PLAY_PAUSE),
        )
        .icon(KeyAddress::new(1, 1), icons::PLAY_PAUSE)
        .press(KeyAddress::new(1, 2), Action::Consumer(ConsumerCode::STOP))
        .icon(KeyAddress::new(1, 2), icons::STOP)
        .press(
            KeyAddress::new(1, 3),
            Action::Consumer(ConsumerCode::SCAN_NEXT_TRACK),
        )
        .icon(KeyAddress::new(1, 3), icons::NEXT_TRACK)
}

//! Built-in modes and icon assets for the Strata macro keypad
//!
//! This crate targets the reference 3x4 pad layout and provides:
//!
//! - [`BaseMode`] - the root layer with the mode-select key
//! - [`PreSelectMode`] / [`SelectMode`] - hold-to-confirm mode selection
//! - [`HotkeyMode`] - a generic, data-driven hotkey layer, plus the
//!   ready-made media and desktop-shortcut sets built from it
//! - [`icons`] - the shared 16x16 icon bitmaps
//!
//! Everything here goes through the public [`strata_core::mode::Mode`]
//! contract; a user-defined mode has exactly the same surface available.

#![no_std]
#![deny(unsafe_code)]

pub mod base;
pub mod hotkeys;
pub mod icons;
pub mod media;
pub mod select;
pub mod shortcuts;

pub use base::BaseMode;
pub use hotkeys::HotkeyMode;
pub use select::{PreSelectMode, SelectMode};

use strata_core::grid::KeyGrid;

/// Rows on the reference pad
pub const ROWS: u8 = 3;

/// Columns on the reference pad
pub const COLS: u8 = 4;

/// The reference pad's key grid
pub const GRID: KeyGrid = KeyGrid::new(ROWS, COLS);

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use heapless::Deque;
    use heapless::Vec as HVec;
    use strata_core::action::KeySet;
    use strata_core::engine::Engine;
    use strata_core::event::InputEvent;
    use strata_core::grid::KeyAddress;
    use strata_core::icon::Icon;
    use strata_core::keys::ConsumerCode;
    use strata_core::mode::ModeRegistry;
    use strata_core::traits::display::{DisplayError, DisplaySink};
    use strata_core::traits::hid::{HidError, HidSink};
    use strata_core::traits::keys::KeySource;

    struct SliceSource {
        events: Deque<InputEvent, 16>,
    }

    impl SliceSource {
        fn new(events: &[InputEvent]) -> Self {
            let mut queue = Deque::new();
            for e in events {
                let _ = queue.push_back(*e);
            }
            Self { events: queue }
        }
    }

    impl KeySource for SliceSource {
        fn poll(&mut self) -> Option<InputEvent> {
            self.events.pop_front()
        }
    }

    #[derive(Default)]
    struct RecordingHid {
        consumer_codes: RefCell<HVec<u16, 8>>,
        chords: RefCell<HVec<KeySet, 8>>,
    }

    impl HidSink for RecordingHid {
        fn send(&mut self, keys: &KeySet) -> Result<(), HidError> {
            let _ = self.chords.borrow_mut().push(keys.clone());
            Ok(())
        }

        fn release(&mut self, _keys: &KeySet) -> Result<(), HidError> {
            Ok(())
        }

        fn consumer(&mut self, code: ConsumerCode) -> Result<(), HidError> {
            let _ = self.consumer_codes.borrow_mut().push(code.0);
            Ok(())
        }

        fn consumer_release(&mut self) -> Result<(), HidError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        title: RefCell<Option<heapless::String<24>>>,
        icons: RefCell<HVec<(KeyAddress, Option<&'static str>), 64>>,
    }

    impl RecordingDisplay {
        fn title(&self) -> Option<heapless::String<24>> {
            self.title.borrow().clone()
        }

        fn icon_at(&self, addr: KeyAddress) -> Option<&'static str> {
            self.icons
                .borrow()
                .iter()
                .rev()
                .find(|(a, _)| *a == addr)
                .and_then(|(_, name)| *name)
        }
    }

    impl DisplaySink for RecordingDisplay {
        fn draw(&mut self, cell: KeyAddress, icon: Option<&Icon>) -> Result<(), DisplayError> {
            let _ = self
                .icons
                .borrow_mut()
                .push((cell, icon.map(|i| i.name)));
            Ok(())
        }

        fn set_title(&mut self, title: Option<&str>) -> Result<(), DisplayError> {
            *self.title.borrow_mut() = title.map(|t| {
                let mut s = heapless::String::new();
                let _ = s.push_str(t);
                s
            });
            Ok(())
        }
    }

    const TICK_MS: u32 = 10;

    fn tick(
        engine: &mut Engine<'_>,
        elapsed_ms: u32,
        events: &[InputEvent],
        hid: &mut RecordingHid,
        display: &mut RecordingDisplay,
    ) {
        let mut source = SliceSource::new(events);
        let report = engine.tick(elapsed_ms, &mut source, hid, display);
        assert!(report.is_clean(), "tick reported faults: {:?}", report.faults);
    }

    #[test]
    fn test_all_builtin_modes_register() {
        let mut base = BaseMode::new();
        let mut preselect = PreSelectMode::new();
        let mut select = SelectMode::new();
        let mut media = media::media_mode();
        let mut shortcuts = shortcuts::shortcuts_mode();

        let mut registry = ModeRegistry::new(GRID);
        registry.register(&mut base).unwrap();
        registry.register(&mut preselect).unwrap();
        registry.register(&mut select).unwrap();
        registry.register(&mut media).unwrap();
        registry.register(&mut shortcuts).unwrap();
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_hold_select_navigate_and_pick_media() {
        let mut base = BaseMode::new();
        let mut preselect = PreSelectMode::new();
        let mut select = SelectMode::new();
        let mut media = media::media_mode();
        let mut shortcuts = shortcuts::shortcuts_mode();

        let mut registry = ModeRegistry::new(GRID);
        registry.register(&mut base).unwrap();
        registry.register(&mut preselect).unwrap();
        registry.register(&mut select).unwrap();
        registry.register(&mut media).unwrap();
        registry.register(&mut shortcuts).unwrap();

        let mut engine = Engine::new(registry, base::NAME).unwrap();
        let mut hid = RecordingHid::default();
        let mut display = RecordingDisplay::default();

        // Pressing the select key pushes the hold-to-confirm guard
        tick(
            &mut engine,
            TICK_MS,
            &[InputEvent::KeyDown(base::SELECT_KEY)],
            &mut hid,
            &mut display,
        );
        assert_eq!(engine.current_mode(), Some(select::PRESELECT_NAME));

        // Holding through the confirmation window opens the selection
        for _ in 0..4 {
            tick(&mut engine, 250, &[], &mut hid, &mut display);
        }
        assert_eq!(engine.current_mode(), Some(select::SELECT_NAME));

        // Selectable modes in registration order: base, media, shortcuts
        assert_eq!(display.title().as_deref(), Some("base"));

        // One encoder detent highlights "media"
        tick(
            &mut engine,
            TICK_MS,
            &[InputEvent::EncoderCw],
            &mut hid,
            &mut display,
        );
        assert_eq!(display.title().as_deref(), Some("media"));

        // Releasing the select key picks it
        tick(
            &mut engine,
            TICK_MS,
            &[InputEvent::KeyUp(base::SELECT_KEY)],
            &mut hid,
            &mut display,
        );
        assert_eq!(engine.current_mode(), Some(media::NAME));
        assert_eq!(engine.stack_depth(), 2);
        assert_eq!(display.title().as_deref(), Some("Media"));
        assert_eq!(
            display.icon_at(KeyAddress::new(1, 1)),
            Some("play-pause")
        );

        // The media keys are live
        tick(
            &mut engine,
            TICK_MS,
            &[InputEvent::KeyDown(KeyAddress::new(1, 1))],
            &mut hid,
            &mut display,
        );
        assert_eq!(
            hid.consumer_codes.borrow().as_slice(),
            &[ConsumerCode::PLAY_PAUSE.0]
        );
    }

    #[test]
    fn test_early_release_aborts_selection() {
        let mut base = BaseMode::new();
        let mut preselect = PreSelectMode::new();
        let mut select = SelectMode::new();

        let mut registry = ModeRegistry::new(GRID);
        registry.register(&mut base).unwrap();
        registry.register(&mut preselect).unwrap();
        registry.register(&mut select).unwrap();

        let mut engine = Engine::new(registry, base::NAME).unwrap();
        let mut hid = RecordingHid::default();
        let mut display = RecordingDisplay::default();

        tick(
            &mut engine,
            TICK_MS,
            &[InputEvent::KeyDown(base::SELECT_KEY)],
            &mut hid,
            &mut display,
        );
        assert_eq!(engine.current_mode(), Some(select::PRESELECT_NAME));

        // Released after 200 ms, well before the hold window completes
        tick(&mut engine, 200, &[], &mut hid, &mut display);
        tick(
            &mut engine,
            TICK_MS,
            &[InputEvent::KeyUp(base::SELECT_KEY)],
            &mut hid,
            &mut display,
        );

        assert_eq!(engine.current_mode(), Some(base::NAME));
        assert_eq!(engine.stack_depth(), 1);
        assert_eq!(display.title().as_deref(), Some("Base"));
    }

    #[test]
    fn test_progress_bar_advances_while_holding() {
        let mut base = BaseMode::new();
        let mut preselect = PreSelectMode::new();
        let mut select = SelectMode::new();

        let mut registry = ModeRegistry::new(GRID);
        registry.register(&mut base).unwrap();
        registry.register(&mut preselect).unwrap();
        registry.register(&mut select).unwrap();

        let mut engine = Engine::new(registry, base::NAME).unwrap();
        let mut hid = RecordingHid::default();
        let mut display = RecordingDisplay::default();

        tick(
            &mut engine,
            TICK_MS,
            &[InputEvent::KeyDown(base::SELECT_KEY)],
            &mut hid,
            &mut display,
        );
        assert_eq!(
            display.icon_at(KeyAddress::new(1, 1)),
            Some("progress-1")
        );

        tick(&mut engine, 300, &[], &mut hid, &mut display);
        assert_eq!(
            display.icon_at(KeyAddress::new(1, 1)),
            Some("progress-2")
        );

        tick(&mut engine, 300, &[], &mut hid, &mut display);
        assert_eq!(
            display.icon_at(KeyAddress::new(1, 1)),
            Some("progress-3")
        );
    }
}

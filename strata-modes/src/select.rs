//! Mode selection, in two stages
//!
//! Holding the select key on the base mode first pushes
//! [`PreSelectMode`], which shows a progress bar while the key stays
//! down. Releasing early aborts back to the base mode; holding through
//! the confirmation window opens [`SelectMode`], where the encoder
//! scrolls through the registered modes and the select key picks one.

use heapless::Vec;

use strata_core::action::{Action, Binding, StackRequest};
use strata_core::grid::KeyAddress;
use strata_core::mode::{Mode, ModeContext, ModeError, MAX_MODES};
use strata_core::table::{ActionTable, IconTable, Table};

use crate::icons;
use crate::{base, COLS, ROWS};

/// Registry name of the pre-selection mode
pub const PRESELECT_NAME: &str = "preselect";

/// Registry name of the selection mode
pub const SELECT_NAME: &str = "select";

/// How long the select key must stay held before the selection opens
pub const HOLD_MS: u32 = 1000;

/// Cell showing the hold progress bar
const PROGRESS_KEY: KeyAddress = KeyAddress::new(1, 1);

/// Hold-to-confirm guard before the mode selection
///
/// Animates a progress bar while the select key is held. An early
/// release resets the stack to the base mode; a full hold replaces this
/// mode with the selection.
#[derive(Debug, Default)]
pub struct PreSelectMode {
    elapsed_ms: u32,
    fired: bool,
}

impl PreSelectMode {
    /// Create the pre-selection mode
    pub const fn new() -> Self {
        Self {
            elapsed_ms: 0,
            fired: false,
        }
    }

    fn frame(&self) -> usize {
        let step = (self.elapsed_ms.saturating_mul(4) / HOLD_MS) as usize;
        step.min(icons::PROGRESS.len() - 1)
    }
}

impl Mode for PreSelectMode {
    fn name(&self) -> &'static str {
        PRESELECT_NAME
    }

    fn hidden(&self) -> bool {
        true
    }

    fn action_table(&self) -> ActionTable {
        let mut table = Table::new(ROWS, COLS);
        // Letting go before the hold completes aborts the selection
        table.set(
            base::SELECT_KEY,
            Binding::on_release(Action::Stack(StackRequest::Reset(base::NAME))),
        );
        table
    }

    fn icon_table(&self) -> IconTable {
        let mut table = Table::new(ROWS, COLS);
        table.set(PROGRESS_KEY, icons::PROGRESS[self.frame()]);
        table
    }

    fn on_activate(&mut self, _ctx: &mut ModeContext<'_>) -> Result<(), ModeError> {
        self.elapsed_ms = 0;
        self.fired = false;
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut ModeContext<'_>, elapsed_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if !self.fired && self.elapsed_ms >= HOLD_MS {
            self.fired = true;
            ctx.replace_mode(SELECT_NAME);
        }
    }
}

/// Encoder-driven list of the registered modes
///
/// The title strip shows the highlighted entry; releasing the select
/// key replaces this mode with it atomically, so the mode beneath is
/// never transiently activated.
#[derive(Debug, Default)]
pub struct SelectMode {
    entries: Vec<&'static str, MAX_MODES>,
    index: usize,
}

impl SelectMode {
    /// Create the selection mode
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
        }
    }

    /// The highlighted entry, if any modes are selectable
    pub fn highlighted(&self) -> Option<&'static str> {
        self.entries.get(self.index).copied()
    }
}

impl Mode for SelectMode {
    fn name(&self) -> &'static str {
        SELECT_NAME
    }

    fn hidden(&self) -> bool {
        true
    }

    fn title(&self) -> Option<&str> {
        self.highlighted().or(Some("No modes"))
    }

    fn action_table(&self) -> ActionTable {
        Table::new(ROWS, COLS)
    }

    fn icon_table(&self) -> IconTable {
        let mut table = Table::new(ROWS, COLS);
        table.set(base::SELECT_KEY, icons::CHECK);
        table
    }

    fn on_activate(&mut self, ctx: &mut ModeContext<'_>) -> Result<(), ModeError> {
        self.entries = ctx.selectable_modes().collect();
        self.index = 0;
        Ok(())
    }

    fn on_encoder(&mut self, _ctx: &mut ModeContext<'_>, delta: i8) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as i32;
        let next = (self.index as i32 + delta as i32).rem_euclid(len);
        self.index = next as usize;
    }

    fn on_key(&mut self, ctx: &mut ModeContext<'_>, addr: KeyAddress, pressed: bool) -> bool {
        if addr != base::SELECT_KEY || pressed {
            return false;
        }
        match self.highlighted() {
            Some(choice) => ctx.replace_mode(choice),
            None => ctx.reset_to(base::NAME),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preselect_progress_frames() {
        let mut mode = PreSelectMode::new();
        assert_eq!(mode.frame(), 0);
        mode.elapsed_ms = HOLD_MS / 4;
        assert_eq!(mode.frame(), 1);
        mode.elapsed_ms = HOLD_MS / 2;
        assert_eq!(mode.frame(), 2);
        mode.elapsed_ms = HOLD_MS;
        assert_eq!(mode.frame(), 3);
        // Clamped past the end of the hold window
        mode.elapsed_ms = HOLD_MS * 10;
        assert_eq!(mode.frame(), 3);
    }

    #[test]
    fn test_preselect_abort_binding() {
        let mode = PreSelectMode::new();
        let table = mode.action_table();
        let binding = table.get(base::SELECT_KEY).unwrap();
        assert_eq!(
            binding.release,
            Some(Action::Stack(StackRequest::Reset(base::NAME)))
        );
    }

    #[test]
    fn test_select_title_tracks_highlight() {
        let mut mode = SelectMode::new();
        assert_eq!(mode.title(), Some("No modes"));

        let _ = mode.entries.push("media");
        let _ = mode.entries.push("shortcuts");
        assert_eq!(mode.title(), Some("media"));

        mode.index = 1;
        assert_eq!(mode.title(), Some("shortcuts"));
    }

    #[test]
    fn test_select_modes_are_hidden() {
        assert!(PreSelectMode::new().hidden());
        assert!(SelectMode::new().hidden());
    }
}

//! Display composition
//!
//! Each tick the compositor takes the active mode's icon table and
//! title, diffs them against what the display already shows, and draws
//! only the cells that changed. A cell without an icon is drawn as an
//! explicit blank, not skipped. Failed draws leave the cell marked
//! dirty so the next tick retries it.

use heapless::{String, Vec};

use crate::grid::{KeyAddress, KeyGrid};
use crate::icon::IconId;
use crate::table::{IconTable, MAX_CELLS};
use crate::traits::display::{DisplayError, DisplaySink};

/// Maximum cached title length; longer titles are truncated for diffing
/// (the display truncates them anyway)
pub const MAX_TITLE: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellState {
    /// Never drawn, or last draw failed
    Unknown,
    Blank,
    Shown(IconId),
}

#[derive(Debug, PartialEq, Eq)]
enum TitleState {
    Unknown,
    Placeholder,
    Text(String<MAX_TITLE>),
}

/// Change-only renderer for the icon grid and title strip
#[derive(Debug)]
pub struct Compositor {
    grid: KeyGrid,
    cells: Vec<CellState, MAX_CELLS>,
    title: TitleState,
}

impl Compositor {
    /// Create a compositor for the given grid
    pub fn new(grid: KeyGrid) -> Self {
        let mut cells = Vec::new();
        for _ in 0..grid.key_count().min(MAX_CELLS) {
            let _ = cells.push(CellState::Unknown);
        }
        Self {
            grid,
            cells,
            title: TitleState::Unknown,
        }
    }

    /// Forget everything shown; the next compose redraws the full frame
    ///
    /// Used after the display sink reports a reconnect.
    pub fn invalidate(&mut self) {
        for cell in &mut self.cells {
            *cell = CellState::Unknown;
        }
        self.title = TitleState::Unknown;
    }

    /// Render the frame, drawing only changed cells
    ///
    /// Returns the number of cells drawn and the first display error, if
    /// any. Errors skip the affected cell for this tick only.
    pub fn compose(
        &mut self,
        title: Option<&str>,
        icons: &IconTable,
        display: &mut dyn DisplaySink,
    ) -> (u8, Option<DisplayError>) {
        let mut drawn = 0u8;
        let mut first_err = None;

        self.compose_title(title, display, &mut first_err);

        let (rows, cols) = self.grid.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                let addr = KeyAddress::new(row, col);
                let Some(index) = self.grid.index(addr) else {
                    continue;
                };
                let icon = icons.get(addr);
                let desired = match icon {
                    Some(icon) => CellState::Shown(icon.id()),
                    None => CellState::Blank,
                };
                if self.cells[index] == desired {
                    continue;
                }
                match display.draw(addr, icon) {
                    Ok(()) => {
                        self.cells[index] = desired;
                        drawn = drawn.saturating_add(1);
                    }
                    Err(e) => {
                        self.cells[index] = CellState::Unknown;
                        if first_err.is_none() {
                            first_err = Some(e);
                        }
                    }
                }
            }
        }

        (drawn, first_err)
    }

    fn compose_title(
        &mut self,
        title: Option<&str>,
        display: &mut dyn DisplaySink,
        first_err: &mut Option<DisplayError>,
    ) {
        let desired = match title {
            Some(text) => {
                let mut cached: String<MAX_TITLE> = String::new();
                let end = floor_char_boundary(text, MAX_TITLE);
                let _ = cached.push_str(&text[..end]);
                TitleState::Text(cached)
            }
            None => TitleState::Placeholder,
        };
        if self.title == desired {
            return;
        }
        match display.set_title(title) {
            Ok(()) => self.title = desired,
            Err(e) => {
                self.title = TitleState::Unknown;
                if first_err.is_none() {
                    *first_err = Some(e);
                }
            }
        }
    }
}

/// Largest index `<= max` that falls on a character boundary
fn floor_char_boundary(text: &str, max: usize) -> usize {
    if text.len() <= max {
        return text.len();
    }
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{Icon, ICON_BYTES};
    use crate::table::Table;
    use core::cell::RefCell;
    use heapless::Vec as HVec;

    static TERMINAL_BITS: [u8; ICON_BYTES] = [0x3C; ICON_BYTES];
    static PLAY_BITS: [u8; ICON_BYTES] = [0x81; ICON_BYTES];

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum DrawCall {
        Cell(KeyAddress, Option<&'static str>),
        Title(Option<heapless::String<24>>),
    }

    #[derive(Default)]
    struct MockDisplay {
        calls: RefCell<HVec<DrawCall, 64>>,
        fail_draws: u8,
    }

    impl MockDisplay {
        fn calls(&self) -> HVec<DrawCall, 64> {
            self.calls.borrow().clone()
        }

        fn clear_calls(&self) {
            self.calls.borrow_mut().clear();
        }
    }

    impl DisplaySink for MockDisplay {
        fn draw(&mut self, cell: KeyAddress, icon: Option<&Icon>) -> Result<(), DisplayError> {
            if self.fail_draws > 0 {
                self.fail_draws -= 1;
                return Err(DisplayError::Busy);
            }
            let _ = self
                .calls
                .borrow_mut()
                .push(DrawCall::Cell(cell, icon.map(|i| i.name)));
            Ok(())
        }

        fn set_title(&mut self, title: Option<&str>) -> Result<(), DisplayError> {
            let cached = title.map(|t| {
                let mut s = heapless::String::new();
                let _ = s.push_str(t);
                s
            });
            let _ = self.calls.borrow_mut().push(DrawCall::Title(cached));
            Ok(())
        }
    }

    fn terminal_icon() -> Icon {
        Icon::new("terminal", &TERMINAL_BITS)
    }

    #[test]
    fn test_first_frame_draws_every_cell() {
        let grid = KeyGrid::new(3, 4);
        let mut compositor = Compositor::new(grid);
        let mut display = MockDisplay::default();

        let mut icons: IconTable = Table::for_grid(&grid);
        icons.set(KeyAddress::new(2, 0), terminal_icon());

        let (drawn, err) = compositor.compose(Some("Hotkeys"), &icons, &mut display);
        assert_eq!(drawn, 12);
        assert!(err.is_none());

        // Mapped cell shows its icon, all others are explicit blanks
        let calls = display.calls();
        assert!(calls.contains(&DrawCall::Cell(
            KeyAddress::new(2, 0),
            Some("terminal")
        )));
        let blanks = calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Cell(_, None)))
            .count();
        assert_eq!(blanks, 11);
    }

    #[test]
    fn test_unchanged_frame_draws_nothing() {
        let grid = KeyGrid::new(3, 4);
        let mut compositor = Compositor::new(grid);
        let mut display = MockDisplay::default();

        let mut icons: IconTable = Table::for_grid(&grid);
        icons.set(KeyAddress::new(2, 0), terminal_icon());

        compositor.compose(Some("Hotkeys"), &icons, &mut display);
        display.clear_calls();

        let (drawn, err) = compositor.compose(Some("Hotkeys"), &icons, &mut display);
        assert_eq!(drawn, 0);
        assert!(err.is_none());
        assert!(display.calls().is_empty());
    }

    #[test]
    fn test_only_changed_cell_redrawn() {
        let grid = KeyGrid::new(3, 4);
        let mut compositor = Compositor::new(grid);
        let mut display = MockDisplay::default();

        let mut icons: IconTable = Table::for_grid(&grid);
        icons.set(KeyAddress::new(2, 0), terminal_icon());
        compositor.compose(None, &icons, &mut display);
        display.clear_calls();

        icons.set(KeyAddress::new(2, 0), Icon::new("play", &PLAY_BITS));
        let (drawn, _) = compositor.compose(None, &icons, &mut display);
        assert_eq!(drawn, 1);
        assert_eq!(
            display.calls().as_slice(),
            &[DrawCall::Cell(KeyAddress::new(2, 0), Some("play"))]
        );
    }

    #[test]
    fn test_title_change_detected() {
        let grid = KeyGrid::new(3, 4);
        let mut compositor = Compositor::new(grid);
        let mut display = MockDisplay::default();
        let icons: IconTable = Table::for_grid(&grid);

        compositor.compose(Some("Base"), &icons, &mut display);
        display.clear_calls();

        // Same title: no call
        compositor.compose(Some("Base"), &icons, &mut display);
        assert!(display.calls().is_empty());

        // Cleared title: placeholder drawn once
        compositor.compose(None, &icons, &mut display);
        assert_eq!(display.calls().as_slice(), &[DrawCall::Title(None)]);
    }

    #[test]
    fn test_failed_draw_retried_next_frame() {
        let grid = KeyGrid::new(1, 2);
        let mut compositor = Compositor::new(grid);
        let mut display = MockDisplay::default();

        let mut icons: IconTable = Table::for_grid(&grid);
        icons.set(KeyAddress::new(0, 0), terminal_icon());

        // First draw of cell (0,0) fails
        display.fail_draws = 1;
        let (drawn, err) = compositor.compose(None, &icons, &mut display);
        assert_eq!(drawn, 1);
        assert_eq!(err, Some(DisplayError::Busy));

        display.clear_calls();
        let (drawn, err) = compositor.compose(None, &icons, &mut display);
        assert_eq!(drawn, 1);
        assert!(err.is_none());
        assert_eq!(
            display.calls().as_slice(),
            &[DrawCall::Cell(KeyAddress::new(0, 0), Some("terminal"))]
        );
    }

    #[test]
    fn test_invalidate_forces_full_redraw() {
        let grid = KeyGrid::new(1, 2);
        let mut compositor = Compositor::new(grid);
        let mut display = MockDisplay::default();
        let icons: IconTable = Table::for_grid(&grid);

        compositor.compose(Some("Base"), &icons, &mut display);
        display.clear_calls();

        compositor.invalidate();
        let (drawn, _) = compositor.compose(Some("Base"), &icons, &mut display);
        assert_eq!(drawn, 2);
        assert_eq!(display.calls().len(), 3); // title + both cells
    }
}

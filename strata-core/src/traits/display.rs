//! Display sink trait for the icon grid and title strip

use crate::grid::KeyAddress;
use crate::icon::Icon;

/// Errors that can occur with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Display queue full, drawing skipped for this tick
    Busy,
    /// Bus-level communication failure
    Bus,
}

/// Sink for composed display output
///
/// Implementations render one icon cell at a time plus an optional title
/// strip. `draw` with `None` clears the cell to blank. The sink is
/// assumed idempotent: drawing the icon a cell already shows is a cheap
/// no-op, but the compositor avoids such calls anyway.
pub trait DisplaySink {
    /// Draw an icon (or blank) at the given grid cell
    fn draw(&mut self, cell: KeyAddress, icon: Option<&Icon>) -> Result<(), DisplayError>;

    /// Update the title strip; `None` clears it to the placeholder
    fn set_title(&mut self, title: Option<&str>) -> Result<(), DisplayError>;
}

//! Per-mode key tables
//!
//! A table maps every address of the key grid to an optional value: an
//! action binding or an icon. Dimensions are fixed at construction and
//! validated against the grid once, at mode registration, never at each
//! lookup.

use heapless::Vec;

use crate::action::Binding;
use crate::grid::{KeyAddress, KeyGrid};
use crate::icon::Icon;

/// Maximum cells per table (bounds supported grid sizes)
pub const MAX_CELLS: usize = 32;

/// Action bindings for a full grid
pub type ActionTable = Table<Binding>;

/// Icons for a full grid
pub type IconTable = Table<Icon>;

/// A dense rows-by-columns map of optional values
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: u8,
    cols: u8,
    cells: Vec<Option<T>, MAX_CELLS>,
}

impl<T> Table<T> {
    /// Create an empty table with the given dimensions
    ///
    /// Dimensions larger than [`MAX_CELLS`] cells are clamped to empty;
    /// such a table can never validate against a real grid.
    pub fn new(rows: u8, cols: u8) -> Self {
        let count = rows as usize * cols as usize;
        let mut cells = Vec::new();
        if count <= MAX_CELLS {
            for _ in 0..count {
                let _ = cells.push(None);
            }
        }
        Self { rows, cols, cells }
    }

    /// Create an empty table sized to a grid
    pub fn for_grid(grid: &KeyGrid) -> Self {
        let (rows, cols) = grid.dimensions();
        Self::new(rows, cols)
    }

    /// Table dimensions as (rows, cols)
    pub fn dimensions(&self) -> (u8, u8) {
        (self.rows, self.cols)
    }

    /// Check that this table covers exactly the given grid
    pub fn matches(&self, grid: &KeyGrid) -> bool {
        self.dimensions() == grid.dimensions() && self.cells.len() == grid.key_count()
    }

    /// Set the value at an address
    ///
    /// Out-of-bounds addresses are ignored and reported via the return
    /// value; tables are built by trusted mode code, so this is a
    /// programming error rather than a runtime condition.
    pub fn set(&mut self, addr: KeyAddress, value: T) -> bool {
        match self.index(addr) {
            Some(i) => {
                self.cells[i] = Some(value);
                true
            }
            None => false,
        }
    }

    /// Value at an address, if any
    pub fn get(&self, addr: KeyAddress) -> Option<&T> {
        self.index(addr).and_then(|i| self.cells[i].as_ref())
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (KeyAddress, Option<&T>)> {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let addr = KeyAddress::new((i / cols as usize) as u8, (i % cols as usize) as u8);
            (addr, cell.as_ref())
        })
    }

    fn index(&self, addr: KeyAddress) -> Option<usize> {
        if addr.row >= self.rows || addr.col >= self.cols {
            return None;
        }
        let i = addr.row as usize * self.cols as usize + addr.col as usize;
        if i < self.cells.len() {
            Some(i)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, Binding};
    use crate::keys::Keycode;

    #[test]
    fn test_empty_lookup() {
        let table: Table<Binding> = Table::new(3, 4);
        assert_eq!(table.dimensions(), (3, 4));
        assert!(table.get(KeyAddress::new(1, 1)).is_none());
    }

    #[test]
    fn test_set_and_get() {
        let mut table: Table<Binding> = Table::new(3, 4);
        let binding = Binding::on_press(Action::chord(&[Keycode::A]));
        assert!(table.set(KeyAddress::new(2, 0), binding.clone()));
        assert_eq!(table.get(KeyAddress::new(2, 0)), Some(&binding));
        assert!(table.get(KeyAddress::new(2, 1)).is_none());
    }

    #[test]
    fn test_out_of_bounds_set_rejected() {
        let mut table: Table<Binding> = Table::new(3, 4);
        let binding = Binding::on_press(Action::chord(&[Keycode::A]));
        assert!(!table.set(KeyAddress::new(3, 0), binding));
    }

    #[test]
    fn test_matches_grid() {
        let grid = KeyGrid::new(3, 4);
        let table: Table<Binding> = Table::for_grid(&grid);
        assert!(table.matches(&grid));

        let wrong: Table<Binding> = Table::new(2, 4);
        assert!(!wrong.matches(&grid));
    }

    #[test]
    fn test_oversized_table_never_matches() {
        // 8x8 would need 64 cells, beyond MAX_CELLS
        let table: Table<Binding> = Table::new(8, 8);
        assert!(!table.matches(&KeyGrid::new(8, 8)));
    }

    #[test]
    fn test_iter_row_major() {
        let mut table: Table<u8> = Table::new(2, 2);
        table.set(KeyAddress::new(1, 0), 7);
        let cells: heapless::Vec<(KeyAddress, Option<u8>), 4> = table
            .iter()
            .map(|(addr, v)| (addr, v.copied()))
            .collect();
        assert_eq!(cells[0], (KeyAddress::new(0, 0), None));
        assert_eq!(cells[2], (KeyAddress::new(1, 0), Some(7)));
    }
}

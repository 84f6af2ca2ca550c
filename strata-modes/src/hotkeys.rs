//! Generic data-driven hotkey mode
//!
//! A `HotkeyMode` is built at boot from a list of key bindings and
//! icons. It has no behavior of its own beyond serving its tables, so
//! most hotkey sets never need a hand-written mode.

use heapless::Vec;

use strata_core::action::{Action, Binding};
use strata_core::grid::{KeyAddress, KeyGrid};
use strata_core::icon::Icon;
use strata_core::mode::Mode;
use strata_core::table::{ActionTable, IconTable, Table};

/// Maximum bindings and icons per hotkey mode
pub const MAX_HOTKEYS: usize = 16;

/// A mode defined entirely by its key tables
#[derive(Debug)]
pub struct HotkeyMode {
    name: &'static str,
    title: Option<&'static str>,
    rows: u8,
    cols: u8,
    bindings: Vec<(KeyAddress, Binding), MAX_HOTKEYS>,
    icons: Vec<(KeyAddress, Icon), MAX_HOTKEYS>,
}

impl HotkeyMode {
    /// Create an empty hotkey mode for the given grid
    pub fn new(name: &'static str, title: Option<&'static str>, grid: &KeyGrid) -> Self {
        let (rows, cols) = grid.dimensions();
        Self {
            name,
            title,
            rows,
            cols,
            bindings: Vec::new(),
            icons: Vec::new(),
        }
    }

    /// Bind an action to the key-down edge of a key
    ///
    /// Bindings beyond [`MAX_HOTKEYS`] are ignored.
    pub fn press(mut self, addr: KeyAddress, action: Action) -> Self {
        self.merge(addr, Some(action), None);
        self
    }

    /// Bind an action to the key-up edge of a key
    pub fn release(mut self, addr: KeyAddress, action: Action) -> Self {
        self.merge(addr, None, Some(action));
        self
    }

    /// Attach an icon to a key
    pub fn icon(mut self, addr: KeyAddress, icon: Icon) -> Self {
        let _ = self.icons.push((addr, icon));
        self
    }

    fn merge(&mut self, addr: KeyAddress, press: Option<Action>, release: Option<Action>) {
        if let Some((_, binding)) = self.bindings.iter_mut().find(|(a, _)| *a == addr) {
            if press.is_some() {
                binding.press = press;
            }
            if release.is_some() {
                binding.release = release;
            }
            return;
        }
        let _ = self.bindings.push((addr, Binding { press, release }));
    }
}

impl Mode for HotkeyMode {
    fn name(&self) -> &'static str {
        self.name
    }

    fn title(&self) -> Option<&str> {
        self.title
    }

    fn action_table(&self) -> ActionTable {
        let mut table = Table::new(self.rows, self.cols);
        for (addr, binding) in &self.bindings {
            table.set(*addr, binding.clone());
        }
        table
    }

    fn icon_table(&self) -> IconTable {
        let mut table = Table::new(self.rows, self.cols);
        for (addr, icon) in &self.icons {
            table.set(*addr, *icon);
        }
        table
    }
}

//! The base mode at the bottom of the stack

use strata_core::action::{Action, Binding, StackRequest};
use strata_core::grid::KeyAddress;
use strata_core::mode::Mode;
use strata_core::table::{ActionTable, IconTable, Table};

use crate::icons;
use crate::select;
use crate::{COLS, ROWS};

/// Registry name of the base mode
pub const NAME: &str = "base";

/// Key that opens the mode selection
pub const SELECT_KEY: KeyAddress = KeyAddress::new(0, 0);

/// Root of the mode stack
///
/// Binds a single key that starts the hold-to-confirm mode selection;
/// every other key is unmapped.
#[derive(Debug, Default)]
pub struct BaseMode;

impl BaseMode {
    /// Create the base mode
    pub const fn new() -> Self {
        Self
    }
}

impl Mode for BaseMode {
    fn name(&self) -> &'static str {
        NAME
    }

    fn title(&self) -> Option<&str> {
        Some("Base")
    }

    fn action_table(&self) -> ActionTable {
        let mut table = Table::new(ROWS, COLS);
        table.set(
            SELECT_KEY,
            Binding::on_press(Action::Stack(StackRequest::Push(select::PRESELECT_NAME))),
        );
        table
    }

    fn icon_table(&self) -> IconTable {
        let mut table = Table::new(ROWS, COLS);
        table.set(SELECT_KEY, icons::LAYERS);
        table
    }
}

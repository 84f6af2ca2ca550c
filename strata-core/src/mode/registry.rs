//! Process-wide mode registry
//!
//! The registry maps mode names to instances and validates mode tables
//! against the key grid exactly once, at registration. It is populated
//! during boot and read-only afterwards, which bounds the set of valid
//! push targets for the whole run.

use heapless::Vec;

use super::{ConfigError, Mode};
use crate::grid::KeyGrid;

/// Maximum registered modes
pub const MAX_MODES: usize = 8;

/// Index of a registered mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeId(u8);

impl ModeId {
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Registration-time facts about a mode
#[derive(Debug, Clone, Copy)]
pub struct ModeInfo {
    /// Registry identity
    pub name: &'static str,
    /// Excluded from selection menus when set
    pub hidden: bool,
}

/// Registry of all modes known to the device
///
/// Owns exclusive borrows of the mode instances for the registry's
/// lifetime; on the device these are `'static` references out of
/// `StaticCell`s, on the host they are plain locals.
pub struct ModeRegistry<'m> {
    grid: KeyGrid,
    infos: Vec<ModeInfo, MAX_MODES>,
    modes: Vec<&'m mut dyn Mode, MAX_MODES>,
}

impl<'m> ModeRegistry<'m> {
    /// Create an empty registry for the given grid
    pub fn new(grid: KeyGrid) -> Self {
        Self {
            grid,
            infos: Vec::new(),
            modes: Vec::new(),
        }
    }

    /// The key grid all registered modes must cover
    pub fn grid(&self) -> KeyGrid {
        self.grid
    }

    /// Number of registered modes
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Register a mode, validating its tables against the grid
    ///
    /// Fails fast on dimension mismatches so an invalid mode is never
    /// reachable via push.
    pub fn register(&mut self, mode: &'m mut dyn Mode) -> Result<ModeId, ConfigError> {
        let name = mode.name();
        if self.lookup(name).is_some() {
            return Err(ConfigError::DuplicateMode);
        }

        let expected = self.grid.dimensions();
        let actions = mode.action_table();
        if !actions.matches(&self.grid) {
            return Err(ConfigError::DimensionMismatch {
                expected,
                found: actions.dimensions(),
            });
        }
        let icons = mode.icon_table();
        if !icons.matches(&self.grid) {
            return Err(ConfigError::DimensionMismatch {
                expected,
                found: icons.dimensions(),
            });
        }

        let info = ModeInfo {
            name,
            hidden: mode.hidden(),
        };
        if self.infos.push(info).is_err() {
            return Err(ConfigError::RegistryFull);
        }
        let id = ModeId(self.modes.len() as u8);
        if self.modes.push(mode).is_err() {
            self.infos.pop();
            return Err(ConfigError::RegistryFull);
        }
        Ok(id)
    }

    /// Find a registered mode by name
    pub fn lookup(&self, name: &str) -> Option<ModeId> {
        self.infos
            .iter()
            .position(|info| info.name == name)
            .map(|i| ModeId(i as u8))
    }

    /// Registration facts for a mode
    pub fn info(&self, id: ModeId) -> &ModeInfo {
        &self.infos[id.index()]
    }

    /// Registration facts for all modes
    pub fn infos(&self) -> &[ModeInfo] {
        &self.infos
    }

    /// Split the registry into shared infos and mutable mode instances
    ///
    /// Lets callers hold a mode mutably while reading the info list,
    /// which every hook invocation needs for its context.
    pub(crate) fn parts_mut(&mut self) -> (&[ModeInfo], &mut [&'m mut dyn Mode]) {
        (&self.infos, &mut self.modes)
    }
}

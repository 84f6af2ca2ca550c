//! The stack of active modes
//!
//! Only the top of the stack is active for input and display; modes
//! below are suspended but keep their state so popping back is cheap.
//! Every mutation runs its hooks in the fixed order deactivate-old,
//! mutate, activate-new, and either completes fully or rolls back to
//! the previous consistent state.

use heapless::Vec;

use super::registry::{ModeId, ModeRegistry};
use super::{ModeContext, ModeError, RequestQueue, StackError};

/// Maximum stacked modes
pub const MAX_STACK: usize = 8;

/// Ordered collection of active modes, bottom to top
///
/// Non-empty once the initial mode is pushed; popping the last entry is
/// rejected so a mode is always active. A mode occurs at most once on
/// the stack: pushing a mode that is already stacked collapses the
/// stack down to it and re-runs its activation.
#[derive(Debug, Default)]
pub struct ModeStack {
    entries: Vec<ModeId, MAX_STACK>,
}

impl ModeStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of stacked modes
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// The active mode; `None` only before the initial push
    pub fn current(&self) -> Option<ModeId> {
        self.entries.last().copied()
    }

    /// Stacked modes, bottom to top
    pub fn entries(&self) -> &[ModeId] {
        &self.entries
    }

    /// Whether the mode is somewhere on the stack
    pub fn contains(&self, id: ModeId) -> bool {
        self.entries.contains(&id)
    }

    /// Push a mode on top of the stack
    pub fn push(
        &mut self,
        id: ModeId,
        registry: &mut ModeRegistry<'_>,
        queue: &mut RequestQueue,
    ) -> Result<(), StackError> {
        let saved = self.entries.clone();
        let prior_top = self.current();

        // Re-pushing a stacked mode collapses everything above it; the
        // removed modes were suspended, so no hooks run for them.
        if let Some(pos) = self.entries.iter().position(|e| *e == id) {
            self.entries.truncate(pos);
        }
        if self.entries.len() == MAX_STACK {
            self.entries = saved;
            return Err(StackError::StackFull);
        }

        if let Some(top) = prior_top {
            deactivate(registry, queue, top);
        }
        let _ = self.entries.push(id);

        match activate(registry, queue, id) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.entries = saved;
                if let Some(top) = prior_top {
                    // Restore the previous top. The stack itself is already
                    // consistent again, so a second failure is not fatal.
                    let _ = activate(registry, queue, top);
                }
                Err(StackError::Activation(e))
            }
        }
    }

    /// Remove the top mode and re-activate the one beneath
    pub fn pop(
        &mut self,
        registry: &mut ModeRegistry<'_>,
        queue: &mut RequestQueue,
    ) -> Result<(), StackError> {
        if self.entries.len() <= 1 {
            return Err(StackError::LastMode);
        }
        let top = match self.current() {
            Some(top) => top,
            None => return Err(StackError::LastMode),
        };

        deactivate(registry, queue, top);
        self.entries.pop();

        let new_top = match self.current() {
            Some(id) => id,
            None => return Err(StackError::LastMode),
        };
        match activate(registry, queue, new_top) {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = self.entries.push(top);
                let _ = activate(registry, queue, top);
                Err(StackError::Activation(e))
            }
        }
    }

    /// Replace the top mode without activating the one beneath
    pub fn replace(
        &mut self,
        id: ModeId,
        registry: &mut ModeRegistry<'_>,
        queue: &mut RequestQueue,
    ) -> Result<(), StackError> {
        let top = match self.current() {
            Some(top) => top,
            None => return self.push(id, registry, queue),
        };
        // Replacing with a mode that already sits deeper on the stack
        // collapses onto it instead of duplicating the entry.
        let below_top = self
            .entries
            .iter()
            .position(|e| *e == id)
            .is_some_and(|pos| pos + 1 != self.entries.len());
        if below_top {
            return self.push(id, registry, queue);
        }

        deactivate(registry, queue, top);
        let last = self.entries.len() - 1;
        self.entries[last] = id;

        match activate(registry, queue, id) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.entries[last] = top;
                let _ = activate(registry, queue, top);
                Err(StackError::Activation(e))
            }
        }
    }

    /// Clear the stack and leave only the given mode
    pub fn reset(
        &mut self,
        id: ModeId,
        registry: &mut ModeRegistry<'_>,
        queue: &mut RequestQueue,
    ) -> Result<(), StackError> {
        let saved = self.entries.clone();
        let prior_top = self.current();

        if let Some(top) = prior_top {
            deactivate(registry, queue, top);
        }
        self.entries.clear();
        let _ = self.entries.push(id);

        match activate(registry, queue, id) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.entries = saved;
                if let Some(top) = prior_top {
                    let _ = activate(registry, queue, top);
                }
                Err(StackError::Activation(e))
            }
        }
    }
}

fn activate(
    registry: &mut ModeRegistry<'_>,
    queue: &mut RequestQueue,
    id: ModeId,
) -> Result<(), ModeError> {
    let (infos, modes) = registry.parts_mut();
    let mut ctx = ModeContext::new(queue, infos);
    modes[id.index()].on_activate(&mut ctx)
}

fn deactivate(registry: &mut ModeRegistry<'_>, queue: &mut RequestQueue, id: ModeId) {
    let (infos, modes) = registry.parts_mut();
    let mut ctx = ModeContext::new(queue, infos);
    modes[id.index()].on_deactivate(&mut ctx);
}

//! The polymorphic mode contract
//!
//! A mode is a self-contained input/output behavior unit: it owns one
//! action mapping and one icon mapping for the full key grid, plus
//! lifecycle hooks. Modes live in a [`ModeRegistry`] for the process
//! lifetime and are layered on a [`ModeStack`] at runtime; only the top
//! of the stack receives input and owns the display.

mod registry;
mod stack;

pub use registry::{ModeId, ModeInfo, ModeRegistry, MAX_MODES};
pub use stack::{ModeStack, MAX_STACK};

use heapless::Deque;

use crate::action::StackRequest;
use crate::grid::KeyAddress;
use crate::table::{ActionTable, IconTable};

/// Maximum queued stack requests between drain points
pub const MAX_REQUESTS: usize = 8;

/// Errors a mode can raise from its activation hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeError {
    /// A resource the mode needs could not be acquired
    Resources,
    /// The mode cannot run in the current context
    Unavailable,
}

/// Configuration errors, detected at registration or push time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A mode table does not cover the key grid
    DimensionMismatch {
        /// Grid dimensions as (rows, cols)
        expected: (u8, u8),
        /// Offending table dimensions as (rows, cols)
        found: (u8, u8),
    },
    /// A mode with this name is already registered
    DuplicateMode,
    /// The registry is full
    RegistryFull,
    /// The named mode is not registered
    UnknownMode,
}

/// Errors from mode stack mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StackError {
    /// Popping the last remaining mode was rejected
    LastMode,
    /// The stack is at capacity
    StackFull,
    /// The new top failed to activate; the mutation was rolled back
    Activation(ModeError),
}

/// Queue of stack mutations requested by actions and mode hooks
///
/// Requests are buffered and applied strictly after the triggering
/// mutation or dispatch step completes, never reentrantly. Overflowing
/// requests are counted and surfaced as a fault instead of corrupting
/// the stack.
#[derive(Debug, Default)]
pub struct RequestQueue {
    items: Deque<StackRequest, MAX_REQUESTS>,
    dropped: u8,
}

impl RequestQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            items: Deque::new(),
            dropped: 0,
        }
    }

    /// Enqueue a request; counts a drop when the queue is full
    pub fn request(&mut self, request: StackRequest) {
        if self.items.push_back(request).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    /// Dequeue the oldest pending request
    pub fn pop_front(&mut self) -> Option<StackRequest> {
        self.items.pop_front()
    }

    /// Whether any requests are pending
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of requests dropped since the last call, resetting the count
    pub fn take_dropped(&mut self) -> u8 {
        core::mem::take(&mut self.dropped)
    }
}

/// Handle passed to every mode hook
///
/// Lets a mode request stack mutations and inspect which modes can be
/// offered for selection. Mutations are queued, not applied in place,
/// so a hook can never observe a half-mutated stack.
pub struct ModeContext<'a> {
    queue: &'a mut RequestQueue,
    modes: &'a [ModeInfo],
}

impl<'a> ModeContext<'a> {
    pub(crate) fn new(queue: &'a mut RequestQueue, modes: &'a [ModeInfo]) -> Self {
        Self { queue, modes }
    }

    /// Request pushing the named mode on top of the stack
    pub fn push_mode(&mut self, name: &'static str) {
        self.queue.request(StackRequest::Push(name));
    }

    /// Request removing the top mode
    pub fn pop_mode(&mut self) {
        self.queue.request(StackRequest::Pop);
    }

    /// Request replacing the top mode atomically
    pub fn replace_mode(&mut self, name: &'static str) {
        self.queue.request(StackRequest::Replace(name));
    }

    /// Request clearing the stack down to the named mode
    pub fn reset_to(&mut self, name: &'static str) {
        self.queue.request(StackRequest::Reset(name));
    }

    /// Names of registered modes that should appear in a selection menu
    pub fn selectable_modes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modes.iter().filter(|m| !m.hidden).map(|m| m.name)
    }
}

/// A layer for the keypad that defines key actions, icons and lifecycle
/// behavior
///
/// Table accessors may return a cached table or recompute one per call;
/// the contract only requires that the result reflect the mode's current
/// intended mapping. Tables must match the registry's grid dimensions,
/// which is validated once at registration.
pub trait Mode {
    /// Registry identity of the mode
    fn name(&self) -> &'static str;

    /// Whether the mode should be hidden from the mode selection
    fn hidden(&self) -> bool {
        false
    }

    /// Title shown in the display's status strip; `None` renders the
    /// placeholder
    fn title(&self) -> Option<&str> {
        None
    }

    /// Action bindings for the full grid
    fn action_table(&self) -> ActionTable;

    /// Icons for the full grid
    fn icon_table(&self) -> IconTable;

    /// Called when the mode becomes top of the stack
    ///
    /// Used for resource acquisition. Activation is atomic: returning an
    /// error leaves the stack unchanged and the previous mode active.
    fn on_activate(&mut self, _ctx: &mut ModeContext<'_>) -> Result<(), ModeError> {
        Ok(())
    }

    /// Called when the mode stops being top of the stack
    ///
    /// The mode may become active again later; this is a suspension, not
    /// a destruction.
    fn on_deactivate(&mut self, _ctx: &mut ModeContext<'_>) {}

    /// Periodic hook, called once per tick for every mode on the stack
    fn on_tick(&mut self, _ctx: &mut ModeContext<'_>, _elapsed_ms: u32) {}

    /// Dedicated encoder handler; `delta` is +1 per clockwise detent
    fn on_encoder(&mut self, _ctx: &mut ModeContext<'_>, _delta: i8) {}

    /// Stateful key hook, consulted before the action table
    ///
    /// Return `true` to consume the event. The default leaves all key
    /// handling to the action table.
    fn on_key(&mut self, _ctx: &mut ModeContext<'_>, _addr: KeyAddress, _pressed: bool) -> bool {
        false
    }
}

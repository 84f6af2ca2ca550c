//! Debounced input source trait

use crate::event::InputEvent;

/// Source of debounced key and encoder transitions
///
/// The engine drains the source once per tick by calling [`poll`] until
/// it returns `None`. Implementations must not block; events that arrive
/// mid-tick are simply picked up on the next tick.
///
/// [`poll`]: KeySource::poll
pub trait KeySource {
    /// Next pending event, or `None` when the source is drained
    fn poll(&mut self) -> Option<InputEvent>;
}

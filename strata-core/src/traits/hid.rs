//! HID sink trait towards the host

use crate::action::KeySet;
use crate::keys::ConsumerCode;

/// Errors that can occur when handing a report to the HID transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    /// Transport queue full, report dropped for this tick
    Busy,
    /// Host not connected / endpoint not configured
    Disconnected,
}

/// Fire-and-forget HID endpoint
///
/// Retry and backoff, if any, are the transport's concern; the
/// dispatcher never retries within a tick. A failed `send` must leave
/// the host-visible keyboard state unchanged.
pub trait HidSink {
    /// Report the given keycodes as held down
    fn send(&mut self, keys: &KeySet) -> Result<(), HidError>;

    /// Report the given keycodes as released
    fn release(&mut self, keys: &KeySet) -> Result<(), HidError>;

    /// Report a consumer-control usage as pressed
    fn consumer(&mut self, code: ConsumerCode) -> Result<(), HidError>;

    /// Release all consumer-control usages
    fn consumer_release(&mut self) -> Result<(), HidError>;
}

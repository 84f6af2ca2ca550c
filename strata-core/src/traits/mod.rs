//! Hardware abstraction traits
//!
//! These traits define the interface between the core logic and the
//! board-specific collaborators: the debounced key/encoder source, the
//! HID endpoint towards the host, and the icon display.

pub mod display;
pub mod hid;
pub mod keys;

pub use display::{DisplayError, DisplaySink};
pub use hid::{HidError, HidSink};
pub use keys::KeySource;

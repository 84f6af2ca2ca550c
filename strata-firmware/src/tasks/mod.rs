//! Embassy tasks, one per hardware concern

pub mod display;
pub mod encoder;
pub mod engine;
pub mod keys;
pub mod usb;

pub use display::display_task;
pub use encoder::encoder_task;
pub use engine::engine_task;
pub use keys::keys_task;
pub use usb::usb_task;

//! Graphic OLED display driver
//!
//! The 128x64 panel is fed page by page over the shared bus. After the
//! power/reset sequence and the init commands, the driver loops forever:
//! fill the frame from the next image, then for each of the 8 pages set the
//! page address and push 129 bytes (data control byte plus 128 columns).

pub mod driver;
pub mod images;
pub mod sequence;

pub use driver::{DisplayDriver, DisplayError, DisplayFault, DisplayState, Resume, FRAME_SIZE};
pub use sequence::{CONTROL_COMMAND, CONTROL_DATA, DISPLAY_ADDR, INIT_SEQUENCE};

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
pub const PAGES: usize = HEIGHT / 8;

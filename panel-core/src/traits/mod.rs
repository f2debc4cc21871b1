//! Device adapter traits
//!
//! The command dispatcher talks to panel peripherals only through these
//! traits. Concrete pin-driving implementations live in `panel-drivers`.

pub mod indicator;
pub mod lcd;
pub mod motor;

pub use indicator::{BuzzerControl, StatusLeds};
pub use lcd::{CharDisplay, LCD_COLUMNS, LCD_LINES};
pub use motor::{Direction, MotorControl};

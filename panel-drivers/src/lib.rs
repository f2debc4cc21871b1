//! Device adapters
//!
//! Concrete implementations of the `panel-core` device traits on top of
//! plain output pins:
//!
//! - Status LEDs and the run heartbeat
//! - Buzzer with a tick countdown
//! - 4-coil unipolar stepper
//! - Character LCD shadow buffer and the error log view

#![no_std]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod lcd;
pub mod led;
pub mod stepper;

#[cfg(test)]
pub(crate) mod mock;

pub use buzzer::Buzzer;
pub use lcd::{ErrorView, LcdShadow};
pub use led::{Heartbeat, LedBank};
pub use stepper::StepMotor;

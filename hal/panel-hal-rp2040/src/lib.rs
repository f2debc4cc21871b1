//! RP2040-specific HAL for the instrument panel firmware
//!
//! Implementations of the `panel-hal` traits on embassy-rp peripherals:
//!
//! - Output pin newtype for LEDs, buzzer, stepper coils and display power
//! - Bit-banged two-wire bus master reporting TWI status codes
//! - Mapping of the link settings onto the UART driver config

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod uart;

pub use gpio::Pin;
pub use i2c::BitBangI2c;
pub use uart::uart_config;

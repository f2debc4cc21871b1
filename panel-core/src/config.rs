//! Board configuration types
//!
//! The firmware build script validates `panel.toml` and bakes the values
//! into a `const` [`PanelConfig`].

use panel_hal::uart::StopBits;
use panel_hal::{I2cConfig, UartConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::display::DISPLAY_ADDR;

/// Tunables for one panel board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Serial link baud rate
    pub baudrate: u32,
    /// Serial stop bits (1 or 2)
    pub stop_bits: u8,
    /// Two-wire bus clock in Hz
    pub bus_frequency_hz: u32,
    /// 7-bit display address
    pub display_address: u8,
    /// Ticks the display power line is held high during reset
    pub power_settle_ticks: u16,
    /// 10 ms ticks per motor step
    pub motor_step_divider: u8,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PanelConfig {
    pub const DEFAULT: Self = Self {
        baudrate: 250_000,
        stop_bits: 2,
        bus_frequency_hz: 400_000,
        display_address: DISPLAY_ADDR,
        power_settle_ticks: 100,
        motor_step_divider: 1,
    };

    /// Serial settings (8 data bits, no parity)
    pub fn uart(&self) -> UartConfig {
        UartConfig {
            baudrate: self.baudrate,
            stop_bits: StopBits::from_count(self.stop_bits).unwrap_or(StopBits::Two),
            ..UartConfig::default()
        }
    }

    pub fn i2c(&self) -> I2cConfig {
        I2cConfig {
            frequency: self.bus_frequency_hz,
        }
    }
}

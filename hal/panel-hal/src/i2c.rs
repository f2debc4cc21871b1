//! I2C bus abstractions
//!
//! The panel drives its two-wire bus one bus condition at a time so that a
//! transaction can be spread over many scheduler ticks. Implementations
//! expose the primitive conditions plus a status register in the classic
//! TWI status-code encoding (see [`status`]).

/// Status codes reported by [`I2cController::status`]
///
/// The values follow the AVR TWI status register (prescaler bits masked).
pub mod status {
    /// Illegal START/STOP or bus stuck
    pub const BUS_ERROR: u8 = 0x00;
    /// START condition transmitted
    pub const START: u8 = 0x08;
    /// Repeated START condition transmitted
    pub const REP_START: u8 = 0x10;
    /// SLA+W transmitted, ACK received
    pub const MT_SLA_ACK: u8 = 0x18;
    /// SLA+W transmitted, NACK received
    pub const MT_SLA_NACK: u8 = 0x20;
    /// Data byte transmitted, ACK received
    pub const MT_DATA_ACK: u8 = 0x28;
    /// Data byte transmitted, NACK received
    pub const MT_DATA_NACK: u8 = 0x30;
    /// SLA+R transmitted, ACK received
    pub const MR_SLA_ACK: u8 = 0x40;
    /// SLA+R transmitted, NACK received
    pub const MR_SLA_NACK: u8 = 0x48;
    /// Data byte received, ACK returned
    pub const MR_DATA_ACK: u8 = 0x50;
    /// Data byte received, NACK returned
    pub const MR_DATA_NACK: u8 = 0x58;
    /// No relevant state information (idle / after STOP)
    pub const NO_INFO: u8 = 0xF8;
}

/// Step-wise I2C bus master
///
/// Each method issues exactly one bus condition and returns without waiting
/// for it to complete. Completion is observed through [`is_ready`] and the
/// outcome through [`status`].
///
/// [`is_ready`]: I2cController::is_ready
/// [`status`]: I2cController::status
pub trait I2cController {
    /// Issue a START condition
    fn start(&mut self);

    /// Shift one byte out (address or data)
    fn write_byte(&mut self, byte: u8);

    /// Issue a STOP condition
    fn stop(&mut self);

    /// True once the last issued condition has completed
    fn is_ready(&self) -> bool;

    /// Status code of the last completed condition
    fn status(&self) -> u8;
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Half of one SCL period in CPU cycles for a given core clock
    pub fn half_period_cycles(&self, core_hz: u32) -> u32 {
        let freq = self.frequency.max(1);
        (core_hz / freq / 2).max(1)
    }
}

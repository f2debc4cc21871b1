//! Bit-banged two-wire bus master
//!
//! SDA and SCL are emulated as open-drain lines on [`Flex`] pins: a line is
//! pulled low by switching the pin to an output driving 0, and released by
//! switching it back to an input with the pull-up enabled. Each bus
//! condition completes before the call returns, so [`I2cController::is_ready`]
//! always reports true.

use embassy_rp::gpio::{Flex, Pull};
use panel_hal::i2c::{status, I2cController};
use panel_hal::I2cConfig;

/// Half-period polls granted to a slave stretching the clock
const STRETCH_LIMIT: u32 = 1000;

/// Where the master is within the current transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    /// Bus released, no START issued
    Released,
    /// START issued, next byte is the address
    Addressing,
    /// Address sent, further bytes are data
    Transferring,
}

/// Status code for a shifted byte given its ACK bit
fn byte_status(state: LineState, byte: u8, acked: bool) -> u8 {
    match state {
        LineState::Released => status::BUS_ERROR,
        LineState::Addressing => match (byte & 1 == 1, acked) {
            (false, true) => status::MT_SLA_ACK,
            (false, false) => status::MT_SLA_NACK,
            (true, true) => status::MR_SLA_ACK,
            (true, false) => status::MR_SLA_NACK,
        },
        LineState::Transferring => {
            if acked {
                status::MT_DATA_ACK
            } else {
                status::MT_DATA_NACK
            }
        }
    }
}

/// Two-wire master on a pair of GPIOs
pub struct BitBangI2c<'d> {
    scl: Flex<'d>,
    sda: Flex<'d>,
    half_period: u32,
    state: LineState,
    status: u8,
}

impl<'d> BitBangI2c<'d> {
    /// Take over the two lines and release them
    ///
    /// `core_hz` is the system clock used to derive the bit timing.
    pub fn new(mut scl: Flex<'d>, mut sda: Flex<'d>, config: &I2cConfig, core_hz: u32) -> Self {
        for line in [&mut scl, &mut sda] {
            line.set_pull(Pull::Up);
            line.set_low();
            line.set_as_input();
        }

        Self {
            scl,
            sda,
            half_period: config.half_period_cycles(core_hz),
            state: LineState::Released,
            status: status::NO_INFO,
        }
    }

    fn delay(&self) {
        cortex_m::asm::delay(self.half_period);
    }

    fn pull_low(line: &mut Flex<'d>) {
        line.set_as_output();
    }

    fn release(line: &mut Flex<'d>) {
        line.set_as_input();
    }

    /// Release SCL and wait out any clock stretching
    fn scl_high(&mut self) -> bool {
        Self::release(&mut self.scl);
        for _ in 0..STRETCH_LIMIT {
            if self.scl.is_high() {
                return true;
            }
            self.delay();
        }
        false
    }

    fn scl_low(&mut self) {
        Self::pull_low(&mut self.scl);
    }

    /// Clock one bit out and read back the line
    fn clock_bit(&mut self, high: bool) -> Option<bool> {
        if high {
            Self::release(&mut self.sda);
        } else {
            Self::pull_low(&mut self.sda);
        }
        self.delay();
        if !self.scl_high() {
            return None;
        }
        self.delay();
        let sampled = self.sda.is_high();
        self.scl_low();
        Some(sampled)
    }

    fn fault(&mut self) {
        Self::release(&mut self.sda);
        Self::release(&mut self.scl);
        self.state = LineState::Released;
        self.status = status::BUS_ERROR;
    }
}

impl I2cController for BitBangI2c<'_> {
    fn start(&mut self) {
        let repeated = self.state != LineState::Released;

        Self::release(&mut self.sda);
        self.delay();
        if !self.scl_high() || self.sda.is_low() {
            self.fault();
            return;
        }
        self.delay();
        Self::pull_low(&mut self.sda);
        self.delay();
        self.scl_low();

        self.state = LineState::Addressing;
        self.status = if repeated {
            status::REP_START
        } else {
            status::START
        };
    }

    fn write_byte(&mut self, byte: u8) {
        if self.state == LineState::Released {
            self.status = status::BUS_ERROR;
            return;
        }

        for bit in (0..8).rev() {
            if self.clock_bit(byte & (1 << bit) != 0).is_none() {
                self.fault();
                return;
            }
        }

        // Ninth clock: slave pulls SDA low to acknowledge
        let acked = match self.clock_bit(true) {
            Some(sda_high) => !sda_high,
            None => {
                self.fault();
                return;
            }
        };

        self.status = byte_status(self.state, byte, acked);
        self.state = LineState::Transferring;
    }

    fn stop(&mut self) {
        Self::pull_low(&mut self.sda);
        self.delay();
        let clock_ok = self.scl_high();
        self.delay();
        Self::release(&mut self.sda);
        self.delay();

        self.state = LineState::Released;
        self.status = if clock_ok {
            status::NO_INFO
        } else {
            status::BUS_ERROR
        };
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn status(&self) -> u8 {
        self.status
    }
}

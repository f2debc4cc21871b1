//! Test doubles shared by the unit tests

use core::cell::Cell;
use std::vec::Vec;

use panel_hal::i2c::{status, I2cController};
use panel_hal::OutputPin;

use crate::traits::{BuzzerControl, CharDisplay, Direction, MotorControl, StatusLeds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Start,
    Write(u8),
    Stop,
}

/// Well-behaved bus controller that acks everything unless told otherwise
pub struct MockI2c {
    pub ops: Vec<BusOp>,
    pub nack_address: bool,
    pub nack_data: bool,
    pub never_ready: bool,
    pub ready_polls: Cell<usize>,
    status: u8,
    expect_address: bool,
}

impl MockI2c {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            nack_address: false,
            nack_data: false,
            never_ready: false,
            ready_polls: Cell::new(0),
            status: status::NO_INFO,
            expect_address: false,
        }
    }

    /// Every byte shifted out, addresses included
    pub fn written(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                BusOp::Write(b) => Some(*b),
                _ => None,
            })
            .collect()
    }
}

impl I2cController for MockI2c {
    fn start(&mut self) {
        self.ops.push(BusOp::Start);
        self.status = status::START;
        self.expect_address = true;
    }

    fn write_byte(&mut self, byte: u8) {
        self.ops.push(BusOp::Write(byte));
        self.status = if self.expect_address {
            self.expect_address = false;
            match (byte & 1 == 1, self.nack_address) {
                (false, false) => status::MT_SLA_ACK,
                (false, true) => status::MT_SLA_NACK,
                (true, false) => status::MR_SLA_ACK,
                (true, true) => status::MR_SLA_NACK,
            }
        } else if self.nack_data {
            status::MT_DATA_NACK
        } else {
            status::MT_DATA_ACK
        };
    }

    fn stop(&mut self) {
        self.ops.push(BusOp::Stop);
        self.status = status::NO_INFO;
    }

    fn is_ready(&self) -> bool {
        self.ready_polls.set(self.ready_polls.get() + 1);
        !self.never_ready
    }

    fn status(&self) -> u8 {
        self.status
    }
}

pub struct MockPin {
    high: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self { high: false }
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

#[derive(Default)]
pub struct MockLeds {
    pub on: [bool; 3],
    pub writes: usize,
}

impl StatusLeds for MockLeds {
    fn count(&self) -> u8 {
        self.on.len() as u8
    }

    fn set(&mut self, id: u8, on: bool) {
        if let Some(led) = self.on.get_mut(id as usize) {
            *led = on;
        }
        self.writes += 1;
    }

    fn is_on(&self, id: u8) -> bool {
        self.on.get(id as usize).copied().unwrap_or(false)
    }
}

#[derive(Default)]
pub struct MockBuzzer {
    pub beeps: Vec<u8>,
}

impl BuzzerControl for MockBuzzer {
    fn beep(&mut self, ticks: u8) {
        self.beeps.push(ticks);
    }

    fn is_active(&self) -> bool {
        !self.beeps.is_empty()
    }
}

#[derive(Default)]
pub struct MockMotor {
    pub remaining: u16,
    pub direction: Option<Direction>,
}

impl MotorControl for MockMotor {
    fn steps_remaining(&self) -> u16 {
        self.remaining
    }

    fn arm(&mut self, direction: Direction, steps: u16) {
        self.direction = Some(direction);
        self.remaining = steps;
    }
}

#[derive(Default)]
pub struct MockLcd {
    pub writes: Vec<(u8, u8, Vec<u8>)>,
}

impl CharDisplay for MockLcd {
    fn write_at(&mut self, line: u8, column: u8, text: &[u8]) {
        self.writes.push((line, column, text.to_vec()));
    }
}

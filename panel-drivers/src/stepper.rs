//! Unipolar stepper on four coil pins
//!
//! One-phase (wave) drive: exactly one coil is energized per step,
//! cycling `1000 → 0100 → 0010 → 0001` clockwise and the reverse
//! counter-clockwise. All coils are released while idle.

use panel_core::traits::{Direction, MotorControl};
use panel_hal::OutputPin;

/// Coil pattern per phase
const PHASES: [[bool; 4]; 4] = [
    [true, false, false, false],
    [false, true, false, false],
    [false, false, true, false],
    [false, false, false, true],
];

/// Steps per output shaft revolution (28BYJ-48 in wave drive)
pub const STEPS_PER_REVOLUTION: u16 = 2048;

pub struct StepMotor<P> {
    coils: [P; 4],
    direction: Direction,
    phase: u8,
    /// Signed step count since power-up
    position: i16,
    steps: u16,
    /// Run calls per step
    divider: u8,
    ticks: u8,
}

impl<P: OutputPin> StepMotor<P> {
    /// Create an idle motor that steps once every `divider` calls to
    /// [`run`](Self::run)
    pub fn new(coils: [P; 4], divider: u8) -> Self {
        let mut motor = Self {
            coils,
            direction: Direction::Clockwise,
            phase: 0,
            position: 0,
            steps: 0,
            divider: divider.max(1),
            ticks: 0,
        };
        motor.release();
        motor
    }

    pub fn position(&self) -> i16 {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Advance the motor; called from the 10 ms tier
    pub fn run(&mut self) {
        self.ticks += 1;
        if self.ticks < self.divider {
            return;
        }
        self.ticks = 0;

        if self.steps == 0 {
            self.release();
            return;
        }

        self.energize(PHASES[self.phase as usize]);
        match self.direction {
            Direction::Clockwise => {
                self.phase = (self.phase + 1) % 4;
                self.position = self.position.wrapping_add(1);
            }
            Direction::CounterClockwise => {
                self.phase = (self.phase + 3) % 4;
                self.position = self.position.wrapping_sub(1);
            }
        }
        self.steps -= 1;
    }

    fn energize(&mut self, pattern: [bool; 4]) {
        for (coil, on) in self.coils.iter_mut().zip(pattern) {
            coil.set_state(on);
        }
    }

    fn release(&mut self) {
        self.energize([false; 4]);
    }
}

impl<P: OutputPin> MotorControl for StepMotor<P> {
    fn steps_remaining(&self) -> u16 {
        self.steps
    }

    fn arm(&mut self, direction: Direction, steps: u16) {
        self.direction = direction;
        self.steps = steps;
    }
}

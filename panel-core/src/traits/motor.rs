//! Stepper motor trait

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Clockwise rotation
    Clockwise,
    /// Counter-clockwise rotation
    CounterClockwise,
}

impl Direction {
    /// Decode the protocol direction digit (0 = clockwise, 1 = counter-clockwise)
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Direction::Clockwise),
            1 => Some(Direction::CounterClockwise),
            _ => None,
        }
    }
}

/// Stepper that executes a queued number of steps in the background
pub trait MotorControl {
    /// Steps still to be executed for the current move
    fn steps_remaining(&self) -> u16;

    /// Queue a new move
    ///
    /// Replaces whatever is queued; callers check [`steps_remaining`] first.
    ///
    /// [`steps_remaining`]: MotorControl::steps_remaining
    fn arm(&mut self, direction: Direction, steps: u16);

    /// True while steps are outstanding
    fn is_busy(&self) -> bool {
        self.steps_remaining() > 0
    }
}

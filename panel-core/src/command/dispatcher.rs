//! Command dispatcher
//!
//! Polled from the 10 ms tier. A complete burst on the serial link is
//! decoded, matched against the command table, validated field by field and
//! executed against the device adapters. Exactly one response frame goes
//! back for every burst.

use panel_protocol::{hex, FrameError, Packet, Response, SerialLink};

use super::error::{response, CommandError};
use super::table::{self, CommandId, MAX_ARGS};
use crate::bus::BusTransactor;
use crate::display::{DisplayDriver, CONTROL_COMMAND, CONTROL_DATA};
use crate::traits::{
    BuzzerControl, CharDisplay, Direction, MotorControl, StatusLeds, LCD_COLUMNS, LCD_LINES,
};

/// Bits of the `mot` argument that carry the step count
pub const MOTOR_STEP_MASK: u16 = 0x0FFF;

/// `old` sub-operations
mod display_op {
    pub const STOP: u8 = 0;
    pub const START: u8 = 1;
    pub const RAW_WRITE: u8 = 2;
}

/// Everything a command can act on
pub struct Devices<'a> {
    pub leds: &'a mut dyn StatusLeds,
    pub buzzer: &'a mut dyn BuzzerControl,
    pub lcd: &'a mut dyn CharDisplay,
    pub motor: &'a mut dyn MotorControl,
    pub display: &'a mut DisplayDriver,
    pub bus: &'a mut BusTransactor,
}

/// Result of the last processed packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outcome {
    /// Matched command, if any
    pub command: Option<CommandId>,
    pub response: Response,
}

/// The command selected by the last dispatch
#[derive(Debug, Clone, Copy)]
struct Current {
    id: CommandId,
    args: [u8; MAX_ARGS],
}

/// Parses packets and runs commands
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    current: Option<Current>,
    last: Option<Outcome>,
}

impl CommandDispatcher {
    pub const fn new() -> Self {
        Self {
            current: None,
            last: None,
        }
    }

    /// Outcome of the most recent packet
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last
    }

    /// Outcome of the most recent packet, reported once
    pub fn take_outcome(&mut self) -> Option<Outcome> {
        self.last.take()
    }

    /// Select the command matching `body`
    ///
    /// Arguments are copied into the single current-command slot.
    pub fn dispatch(&mut self, body: &[u8]) -> Result<CommandId, CommandError> {
        self.current = None;
        let spec = table::lookup(body).ok_or(CommandError::CommandNotFound)?;

        let mut args = [0u8; MAX_ARGS];
        args[..spec.arg_len].copy_from_slice(&body[table::NAME_LEN..]);
        self.current = Some(Current { id: spec.id, args });
        Ok(spec.id)
    }

    /// Run the selected command and clear the slot
    pub fn execute(&mut self, devices: &mut Devices<'_>) -> Result<(), CommandError> {
        let current = self.current.take().ok_or(CommandError::CommandNotFound)?;
        let args = &current.args;

        match current.id {
            CommandId::Led => exec_led(args, devices),
            CommandId::Lcd => exec_lcd(args, devices),
            CommandId::Bip => exec_bip(args, devices),
            CommandId::Old => exec_old(args, devices),
            CommandId::Mot => exec_mot(args, devices),
        }
    }

    /// Decode, dispatch and execute one received packet
    pub fn process(
        &mut self,
        packet: Result<Packet, FrameError>,
        devices: &mut Devices<'_>,
    ) -> Outcome {
        let mut command = None;
        let result = match packet {
            Err(err) => Err(CommandError::from(err)),
            Ok(body) if body.is_empty() => Err(CommandError::CorruptedPackage),
            Ok(body) => match self.dispatch(&body) {
                Ok(id) => {
                    command = Some(id);
                    self.execute(devices)
                }
                Err(err) => Err(err),
            },
        };

        let outcome = Outcome {
            command,
            response: response(result),
        };
        self.last = Some(outcome);
        outcome
    }

    /// Poll the link; handle at most one burst
    ///
    /// Returns `true` when a response was queued on an idle transmitter and
    /// the caller has to kick it.
    pub fn run(&mut self, link: &mut SerialLink, devices: &mut Devices<'_>) -> bool {
        if link.pending_receive_len() == 0 {
            return false;
        }

        let outcome = self.process(link.receive_packet(), devices);
        link.transmit(outcome.response.as_bytes())
    }
}

fn exec_led(args: &[u8; MAX_ARGS], devices: &mut Devices<'_>) -> Result<(), CommandError> {
    let id = hex::digit(args[0])?;
    let state = hex::digit(args[1])?;

    if id >= devices.leds.count() {
        return Err(CommandError::LedWrongId);
    }
    let on = match state {
        0 => false,
        1 => true,
        _ => return Err(CommandError::LedWrongState),
    };

    devices.leds.set(id, on);
    Ok(())
}

fn exec_lcd(args: &[u8; MAX_ARGS], devices: &mut Devices<'_>) -> Result<(), CommandError> {
    let line = hex::digit(args[0])?;
    let column = hex::digit(args[1])?;

    if column >= LCD_COLUMNS {
        return Err(CommandError::LcdWrongPosition);
    }
    if line >= LCD_LINES {
        return Err(CommandError::LcdWrongLineId);
    }

    let text = &args[2..4];
    if !text.iter().all(|&ch| (0x20..=0x7E).contains(&ch)) {
        return Err(CommandError::WrongCharacter);
    }

    devices.lcd.write_at(line, column, text);
    Ok(())
}

fn exec_bip(args: &[u8; MAX_ARGS], devices: &mut Devices<'_>) -> Result<(), CommandError> {
    let ticks = hex::digit(args[0])?;
    if ticks == 0 {
        return Err(CommandError::BuzzerWrongTime);
    }

    devices.buzzer.beep(ticks);
    Ok(())
}

fn exec_old(args: &[u8; MAX_ARGS], devices: &mut Devices<'_>) -> Result<(), CommandError> {
    let op = hex::digit(args[0])?;
    let control_id = hex::digit(args[1])?;
    let data = hex::byte(&args[2..4])?;

    match op {
        display_op::STOP => devices.display.stop()?,
        display_op::START => devices.display.start()?,
        display_op::RAW_WRITE => {
            let control = match control_id {
                0 => CONTROL_COMMAND,
                1 => CONTROL_DATA,
                _ => return Err(CommandError::DisplayWrongControlByte),
            };
            devices
                .display
                .send_byte_secured(devices.bus, control, data)?;
        }
        _ => return Err(CommandError::DisplayWrongCommandId),
    }
    Ok(())
}

fn exec_mot(args: &[u8; MAX_ARGS], devices: &mut Devices<'_>) -> Result<(), CommandError> {
    if devices.motor.is_busy() {
        return Err(CommandError::MotorBusy);
    }

    let direction = hex::digit(args[0])?;
    let steps = hex::word(&args[..4])? & MOTOR_STEP_MASK;
    let direction = Direction::from_digit(direction).ok_or(CommandError::MotorWrongDirection)?;

    devices.motor.arm(direction, steps);
    Ok(())
}

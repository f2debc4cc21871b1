//! Command errors and their wire responses

use panel_protocol::{FrameError, HexError, Response};

use crate::display::DisplayError;

/// Reasons a packet did not produce `_OK_`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Non-printable character in a text field
    WrongCharacter,
    /// Numeric field is not hex
    WrongHexDigit,
    /// No table entry matches name and length
    CommandNotFound,
    /// Frame could not be decoded or had an empty body
    CorruptedPackage,
    LedWrongId,
    LedWrongState,
    LcdWrongLineId,
    LcdWrongPosition,
    BuzzerWrongTime,
    DisplayWrongControlByte,
    DisplayWrongCommandId,
    DisplayFailToStop,
    DisplayFailToStart,
    MotorWrongDirection,
    MotorBusy,
    /// Bus transaction still in flight
    BusBusy,
}

impl From<HexError> for CommandError {
    fn from(_: HexError) -> Self {
        CommandError::WrongHexDigit
    }
}

impl From<FrameError> for CommandError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::InvalidLength(_) => CommandError::WrongHexDigit,
            FrameError::MissingStart | FrameError::BodyTooLong | FrameError::MissingStop => {
                CommandError::CorruptedPackage
            }
        }
    }
}

impl From<DisplayError> for CommandError {
    fn from(err: DisplayError) -> Self {
        match err {
            DisplayError::FailToStop => CommandError::DisplayFailToStop,
            DisplayError::FailToStart => CommandError::DisplayFailToStart,
            DisplayError::BusBusy => CommandError::BusBusy,
        }
    }
}

impl From<CommandError> for Response {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::WrongCharacter => Response::StrWrongCharacter,
            CommandError::WrongHexDigit => Response::StrWrongHexDigit,
            CommandError::CommandNotFound => Response::CmdNotFound,
            CommandError::CorruptedPackage => Response::CmdCorruptedPackage,
            CommandError::LedWrongId => Response::LedWrongId,
            CommandError::LedWrongState => Response::LedWrongState,
            CommandError::LcdWrongLineId => Response::LcdWrongLineId,
            CommandError::LcdWrongPosition => Response::LcdWrongPosition,
            CommandError::BuzzerWrongTime => Response::BuzWrongTime,
            CommandError::DisplayWrongControlByte => Response::OledWrongControlByte,
            CommandError::DisplayWrongCommandId => Response::OledWrongCommandId,
            CommandError::DisplayFailToStop => Response::OledFailToStop,
            CommandError::DisplayFailToStart => Response::OledFailToStart,
            CommandError::MotorWrongDirection => Response::MotWrongDirection,
            CommandError::MotorBusy => Response::MotBusy,
            CommandError::BusBusy => Response::TwiBusy,
        }
    }
}

/// Response for a finished command
pub fn response(result: Result<(), CommandError>) -> Response {
    match result {
        Ok(()) => Response::Ok,
        Err(err) => err.into(),
    }
}

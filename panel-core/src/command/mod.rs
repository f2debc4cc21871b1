//! Remote command handling
//!
//! A packet body is a 3-letter command name followed by a fixed number of
//! ASCII argument bytes:
//!
//! | Name  | Args | Layout                                   |
//! |-------|------|------------------------------------------|
//! | `led` | 2    | LED id, state (hex digits)               |
//! | `lcd` | 4    | line, column (hex digits), 2 characters  |
//! | `bip` | 1    | duration (hex digit, nonzero)            |
//! | `old` | 4    | sub-op, control id (hex digits), data byte |
//! | `mot` | 4    | direction digit + 3-digit step count     |
//!
//! Every packet yields exactly one [`Response`](panel_protocol::Response).

pub mod dispatcher;
pub mod error;
pub mod table;

pub use dispatcher::{CommandDispatcher, Devices, Outcome, MOTOR_STEP_MASK};
pub use error::CommandError;
pub use table::{CommandId, CommandSpec, COMMANDS, MAX_ARGS, NAME_LEN};

//! State shared between Embassy tasks
//!
//! The serial link is touched from both UART tasks and the scheduler, so it
//! lives behind a critical-section mutex. Access is always short and never
//! spans an await point.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use panel_protocol::SerialLink;

/// Transmit and receive rings of the host link
pub static SERIAL: Mutex<CriticalSectionRawMutex, RefCell<SerialLink>> =
    Mutex::new(RefCell::new(SerialLink::new()));

/// Raised when a response was queued on an idle transmitter
pub static TX_KICK: Signal<CriticalSectionRawMutex, ()> = Signal::new();

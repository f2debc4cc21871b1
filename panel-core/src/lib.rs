//! Board-agnostic core logic for the instrument panel firmware
//!
//! This crate holds every state machine that does not touch hardware
//! registers directly:
//!
//! - Two-wire bus transaction engine ([`bus::BusTransactor`])
//! - Graphic display streaming driver ([`display::DisplayDriver`])
//! - Remote command parsing and execution ([`command::CommandDispatcher`])
//! - Bounded fault log ([`diag::ErrorLog`])
//! - Tiered tick flags ([`scheduler::TaskTimer`])
//! - Device adapter traits and configuration types
//!
//! Nothing here blocks. Each component exposes a `run()` step that the
//! firmware calls from its tick loop.

// Test mocks record into std collections
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod command;
pub mod config;
pub mod diag;
pub mod display;
pub mod scheduler;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

//! Two-wire bus transaction engine
//!
//! A transaction is spread across scheduler ticks, one bus condition per
//! [`BusTransactor::run`] call:
//!
//! ```text
//! Idle ──send──► Start ──► Address ──► Data ─┬─► Stop ──► Idle
//!                                     ▲      │
//!                                     └──────┘ one byte per step
//! ```

pub mod transactor;

pub use transactor::{
    Access, BusError, BusFault, BusTransactor, Phase, Source, READY_POLL_LIMIT, STAGING_CAPACITY,
};

//! Panel serial link protocol
//!
//! This crate implements the text framing used between a host and the
//! instrument panel, plus the interrupt-fed byte queues that carry it.
//!
//! # Frame Overview
//!
//! Every message, in both directions, is wrapped in the same ASCII frame:
//! ```text
//! ┌───────┬────────┬──────────────┬────────┐
//! │ "ASK" │ LENGTH │ BODY         │ "END\n"│
//! │ 3B    │ 2 hex  │ 0–55B        │ 4B     │
//! └───────┴────────┴──────────────┴────────┘
//! ```
//!
//! The receive side never blocks: bytes are appended from the UART
//! interrupt and the foreground polls [`SerialLink::pending_receive_len`]
//! until a `'\n'` has closed the burst.

// Host tests (proptest) need the std prelude
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod hex;
pub mod link;
pub mod response;
pub mod ring;

pub use frame::{FrameError, Packet, MAX_BODY_LEN, MAX_FRAME_LEN};
pub use hex::HexError;
pub use link::{RxState, SerialLink};
pub use response::Response;
pub use ring::RingBuffer;

//! Frame encoding and decoding for the serial command link.
//!
//! Frame format:
//! - START (3 bytes): literal `ASK`
//! - LENGTH (2 bytes): body length as upper-case ASCII hex
//! - BODY (0-55 bytes): command or response text
//! - STOP (4 bytes): literal `END\n`

use heapless::Vec;

use crate::hex::{self, HexError};

/// Frame start marker
pub const START_SEQ: &[u8; 3] = b"ASK";

/// Frame stop marker
pub const STOP_SEQ: &[u8; 4] = b"END\n";

/// Number of ASCII digits in the length field
pub const LENGTH_DIGITS: usize = 2;

/// Bytes added around every body
pub const FRAME_OVERHEAD: usize = START_SEQ.len() + LENGTH_DIGITS + STOP_SEQ.len();

/// Transmit ring capacity
pub const TX_BUFFER_SIZE: usize = 64;

/// Receive ring capacity
pub const RX_BUFFER_SIZE: usize = 64;

/// Largest body that fits one frame in the transmit ring
pub const MAX_BODY_LEN: usize = TX_BUFFER_SIZE - FRAME_OVERHEAD;

/// Largest complete frame
pub const MAX_FRAME_LEN: usize = MAX_BODY_LEN + FRAME_OVERHEAD;

/// A decoded frame body
pub type Packet = Vec<u8, MAX_BODY_LEN>;

/// Errors that can occur while decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// No `ASK` marker in the received bytes
    MissingStart,
    /// Length field is not two hex digits
    InvalidLength(HexError),
    /// Length field exceeds [`MAX_BODY_LEN`]
    BodyTooLong,
    /// `END\n` not found right after the body window
    MissingStop,
}

/// Encode `body` into a complete frame
///
/// Bodies longer than [`MAX_BODY_LEN`] are truncated.
pub fn encode(body: &[u8]) -> Vec<u8, MAX_FRAME_LEN> {
    let body = &body[..body.len().min(MAX_BODY_LEN)];
    let mut frame = Vec::new();

    // Capacity is MAX_BODY_LEN + FRAME_OVERHEAD, so none of these can fail
    let _ = frame.extend_from_slice(START_SEQ);
    let _ = frame.extend_from_slice(&hex::encode_byte(body.len() as u8));
    let _ = frame.extend_from_slice(body);
    let _ = frame.extend_from_slice(STOP_SEQ);

    frame
}

/// Decode the first frame found in `bytes`
///
/// Only the first `ASK` marker is honoured. Bytes before it are ignored;
/// the stop marker must sit exactly after the body window given by the
/// length field.
pub fn decode(bytes: &[u8]) -> Result<Packet, FrameError> {
    let start = bytes
        .windows(START_SEQ.len())
        .position(|w| w == START_SEQ)
        .ok_or(FrameError::MissingStart)?;

    let length_pos = start + START_SEQ.len();
    let body_pos = length_pos + LENGTH_DIGITS;
    if body_pos > bytes.len() {
        return Err(FrameError::MissingStop);
    }

    let body_len =
        hex::byte(&bytes[length_pos..body_pos]).map_err(FrameError::InvalidLength)? as usize;
    if body_len > MAX_BODY_LEN {
        return Err(FrameError::BodyTooLong);
    }

    let stop_pos = body_pos + body_len;
    match bytes.get(stop_pos..stop_pos + STOP_SEQ.len()) {
        Some(stop) if stop == STOP_SEQ => {}
        _ => return Err(FrameError::MissingStop),
    }

    let mut packet = Packet::new();
    packet
        .extend_from_slice(&bytes[body_pos..stop_pos])
        .map_err(|_| FrameError::BodyTooLong)?;
    Ok(packet)
}

//! Interrupt-fed serial link
//!
//! [`SerialLink`] owns both byte rings. The UART interrupt side calls
//! [`SerialLink::on_receive`] and [`SerialLink::pop_transmit`]; the
//! foreground side polls [`SerialLink::pending_receive_len`], pulls packets
//! with [`SerialLink::receive_packet`] and queues responses with
//! [`SerialLink::transmit`].
//!
//! A received burst becomes visible only once its terminating `'\n'` has
//! been seen, so the foreground never decodes half a frame.

use crate::frame::{self, FrameError, Packet, RX_BUFFER_SIZE, TX_BUFFER_SIZE};
use crate::ring::RingBuffer;

/// Byte that closes an inbound burst
pub const RX_TERMINATOR: u8 = b'\n';

/// Receive channel state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxState {
    /// Last byte was the terminator (or nothing received yet)
    Idle,
    /// A burst is in progress
    Busy,
}

/// Framed serial link with transmit and receive rings
#[derive(Debug, Clone)]
pub struct SerialLink {
    tx: RingBuffer<TX_BUFFER_SIZE>,
    /// True while the transmitter is draining the ring
    tx_active: bool,
    rx: RingBuffer<RX_BUFFER_SIZE>,
    rx_state: RxState,
    /// Bytes received since the counter was last consumed
    rx_pending: u16,
}

impl Default for SerialLink {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialLink {
    /// Create an idle link with empty rings
    pub const fn new() -> Self {
        Self {
            tx: RingBuffer::new(),
            tx_active: false,
            rx: RingBuffer::new(),
            rx_state: RxState::Idle,
            rx_pending: 0,
        }
    }

    /// Queue `body` as one complete frame
    ///
    /// The body is silently truncated to [`frame::MAX_BODY_LEN`]. Returns
    /// `true` when the transmitter was idle and has to be kicked.
    pub fn transmit(&mut self, body: &[u8]) -> bool {
        for &byte in frame::encode(body).iter() {
            self.tx.push(byte);
        }

        let kick = !self.tx_active;
        self.tx_active = true;
        kick
    }

    /// Next byte for the transmitter (transmit-complete interrupt side)
    ///
    /// Returns `None` once the ring is empty and marks the transmitter idle.
    pub fn pop_transmit(&mut self) -> Option<u8> {
        let byte = self.tx.pop();
        if byte.is_none() {
            self.tx_active = false;
        }
        byte
    }

    /// True while queued bytes are waiting for the transmitter
    pub fn is_transmitting(&self) -> bool {
        self.tx_active
    }

    /// Store one received byte (receive interrupt side)
    pub fn on_receive(&mut self, byte: u8) {
        self.rx.push(byte);
        self.rx_state = if byte == RX_TERMINATOR {
            RxState::Idle
        } else {
            RxState::Busy
        };
        self.rx_pending = self.rx_pending.saturating_add(1);
    }

    /// Current receive channel state
    pub fn rx_state(&self) -> RxState {
        self.rx_state
    }

    /// Bytes received since the last call, once the channel is idle
    ///
    /// While a burst is still arriving this returns 0 and keeps counting.
    /// When idle the count is returned and reset, so a second call without
    /// new input returns 0.
    pub fn pending_receive_len(&mut self) -> u16 {
        match self.rx_state {
            RxState::Idle => core::mem::take(&mut self.rx_pending),
            RxState::Busy => 0,
        }
    }

    /// Drain the receive ring and decode the first frame in it
    ///
    /// All buffered bytes are consumed whether or not decoding succeeds.
    pub fn receive_packet(&mut self) -> Result<Packet, FrameError> {
        let mut scratch = [0u8; RX_BUFFER_SIZE];
        let len = self.rx.drain_into(&mut scratch);
        frame::decode(&scratch[..len])
    }
}

//! Fixed-capacity byte ring
//!
//! Cursors wrap modulo `N`. Pushing into a full ring overwrites the oldest
//! byte, which is what the UART interrupts do on this link: there is no
//! flow control.

/// Byte ring buffer with explicit read/write cursors
#[derive(Debug, Clone)]
pub struct RingBuffer<const N: usize> {
    buf: [u8; N],
    read: usize,
    write: usize,
    len: usize,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    /// Create an empty ring
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            read: 0,
            write: 0,
            len: 0,
        }
    }

    /// Number of queued bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no bytes are queued
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a byte, dropping the oldest one if the ring is full
    ///
    /// Returns `true` if a byte was overwritten.
    pub fn push(&mut self, byte: u8) -> bool {
        self.buf[self.write] = byte;
        self.write = (self.write + 1) % N;

        if self.len == N {
            // Write cursor ran over the read cursor
            self.read = (self.read + 1) % N;
            true
        } else {
            self.len += 1;
            false
        }
    }

    /// Remove and return the oldest byte
    pub fn pop(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        let byte = self.buf[self.read];
        self.read = (self.read + 1) % N;
        self.len -= 1;
        Some(byte)
    }

    /// Drain queued bytes into `dst` in order, returning how many were copied
    pub fn drain_into(&mut self, dst: &mut [u8]) -> usize {
        let mut count = 0;
        while count < dst.len() {
            match self.pop() {
                Some(byte) => {
                    dst[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }
        count
    }
}

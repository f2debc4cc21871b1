//! Bounded error log

use heapless::Vec;

/// Default number of records kept between clears
pub const ERROR_LOG_CAPACITY: usize = 8;

/// Component that raised a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ObjectId {
    Bus = 0x1,
    Display = 0x2,
}

/// One logged fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorRecord {
    /// Reporting component
    pub object: ObjectId,
    /// Component-specific fault code (4 bits)
    pub code: u8,
    /// Raw hardware status at the time of the fault
    pub status: u8,
}

impl ErrorRecord {
    pub const fn new(object: ObjectId, code: u8, status: u8) -> Self {
        Self {
            object,
            code,
            status,
        }
    }

    /// Object and code packed into one byte, object in the high nibble
    pub fn tag(&self) -> u8 {
        ((self.object as u8) << 4) | (self.code & 0x0F)
    }
}

/// Destination for fault records
pub trait ErrorSink {
    /// Append a record
    fn push(&mut self, record: ErrorRecord);

    /// Drop all records
    fn clear(&mut self);
}

/// Fixed-capacity log that keeps the first `N` faults since the last clear
///
/// Once full, further records are counted but not stored.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog<const N: usize = ERROR_LOG_CAPACITY> {
    records: Vec<ErrorRecord, N>,
    dropped: u16,
}

impl<const N: usize> ErrorLog<N> {
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            dropped: 0,
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records that arrived while the log was full
    pub fn dropped(&self) -> u16 {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ErrorRecord> {
        self.records.get(index)
    }
}

impl<const N: usize> ErrorSink for ErrorLog<N> {
    fn push(&mut self, record: ErrorRecord) {
        if self.records.push(record).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    fn clear(&mut self) {
        self.records.clear();
        self.dropped = 0;
    }
}

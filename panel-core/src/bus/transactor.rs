//! Step-wise bus master

use heapless::Vec;
use panel_hal::i2c::{status, I2cController};

use crate::diag::{ErrorRecord, ErrorSink, ObjectId};

/// Largest RAM payload; one display page plus its control byte
pub const STAGING_CAPACITY: usize = 129;

/// Busy-wait bound on the controller ready flag
pub const READY_POLL_LIMIT: u8 = 254;

/// Transaction phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Idle,
    Start,
    Address,
    Data,
    Stop,
}

/// Direction bit carried in the address byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    Write,
    Read,
}

impl Access {
    fn bit(self) -> u8 {
        match self {
            Access::Write => 0,
            Access::Read => 1,
        }
    }
}

/// Bytes to shift out during the data phase
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// Firmware-resident data, read in place
    Rom(&'static [u8]),
    /// Caller-owned data, copied at send time
    Ram(&'a [u8]),
}

/// Errors returned when queueing a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Another transaction is still in flight
    Busy,
    /// RAM source exceeds [`STAGING_CAPACITY`]
    SourceTooLong,
}

/// Fault codes logged under [`ObjectId::Bus`]
///
/// Each code names the status the engine was waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BusFault {
    StartTimeout = 0x1,
    MtSlaAckTimeout = 0x2,
    MrSlaAckTimeout = 0x3,
    MtDataAckTimeout = 0x4,
    MrDataAckTimeout = 0x5,
    MrDataNackTimeout = 0x6,
    StartMismatch = 0x9,
    MtSlaAckMismatch = 0xA,
    MrSlaAckMismatch = 0xB,
    MtDataAckMismatch = 0xC,
    MrDataAckMismatch = 0xD,
    MrDataNackMismatch = 0xE,
    Undefined = 0xF,
}

impl BusFault {
    fn timeout(expected: u8) -> Self {
        match expected {
            status::START => BusFault::StartTimeout,
            status::MT_SLA_ACK => BusFault::MtSlaAckTimeout,
            status::MR_SLA_ACK => BusFault::MrSlaAckTimeout,
            status::MT_DATA_ACK => BusFault::MtDataAckTimeout,
            status::MR_DATA_ACK => BusFault::MrDataAckTimeout,
            status::MR_DATA_NACK => BusFault::MrDataNackTimeout,
            _ => BusFault::Undefined,
        }
    }

    fn mismatch(expected: u8) -> Self {
        match expected {
            status::START => BusFault::StartMismatch,
            status::MT_SLA_ACK => BusFault::MtSlaAckMismatch,
            status::MR_SLA_ACK => BusFault::MrSlaAckMismatch,
            status::MT_DATA_ACK => BusFault::MtDataAckMismatch,
            status::MR_DATA_ACK => BusFault::MrDataAckMismatch,
            status::MR_DATA_NACK => BusFault::MrDataNackMismatch,
            _ => BusFault::Undefined,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Payload {
    Rom(&'static [u8]),
    Staged,
}

/// Single-transaction bus engine
///
/// Only one transaction can be in flight. Faults never abort a transaction:
/// they are logged and the engine keeps stepping until `Idle`.
#[derive(Debug)]
pub struct BusTransactor {
    phase: Phase,
    /// Address byte including the direction bit
    address: u8,
    access: Access,
    payload: Payload,
    staging: Vec<u8, STAGING_CAPACITY>,
    cursor: usize,
    /// Bytes requested back in read mode (not clocked in yet)
    read_len: usize,
    expected: u8,
}

impl Default for BusTransactor {
    fn default() -> Self {
        Self::new()
    }
}

impl BusTransactor {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            address: 0,
            access: Access::Write,
            payload: Payload::Rom(&[]),
            staging: Vec::new(),
            cursor: 0,
            read_len: 0,
            expected: status::NO_INFO,
        }
    }

    /// Queue a write of `source` to the 7-bit `address`
    pub fn send_write(&mut self, address: u8, source: Source<'_>) -> Result<(), BusError> {
        self.begin(address, Access::Write, source, 0)
    }

    /// Queue a read-direction transaction
    ///
    /// The source bytes are shifted out after the address; `read_len` is
    /// recorded for the caller but no bytes are clocked back in.
    pub fn send_read_write(
        &mut self,
        address: u8,
        source: Source<'_>,
        read_len: usize,
    ) -> Result<(), BusError> {
        self.begin(address, Access::Read, source, read_len)
    }

    fn begin(
        &mut self,
        address: u8,
        access: Access,
        source: Source<'_>,
        read_len: usize,
    ) -> Result<(), BusError> {
        if self.is_busy() {
            return Err(BusError::Busy);
        }

        self.payload = match source {
            Source::Rom(bytes) => Payload::Rom(bytes),
            Source::Ram(bytes) => {
                self.staging.clear();
                self.staging
                    .extend_from_slice(bytes)
                    .map_err(|_| BusError::SourceTooLong)?;
                Payload::Staged
            }
        };

        self.address = (address << 1) | access.bit();
        self.access = access;
        self.read_len = read_len;
        self.cursor = 0;
        self.phase = Phase::Start;
        Ok(())
    }

    /// True while a transaction is in flight
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Address byte of the current (or last) transaction
    pub fn address_byte(&self) -> u8 {
        self.address
    }

    /// Bytes already shifted out in the data phase
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn read_len(&self) -> usize {
        self.read_len
    }

    fn payload(&self) -> &[u8] {
        match self.payload {
            Payload::Rom(bytes) => bytes,
            Payload::Staged => &self.staging,
        }
    }

    /// Advance the transaction by one bus condition
    pub fn run<H, E>(&mut self, hw: &mut H, errors: &mut E)
    where
        H: I2cController + ?Sized,
        E: ErrorSink + ?Sized,
    {
        match self.phase {
            Phase::Idle => {}
            Phase::Start => {
                hw.start();
                self.cursor = 0;
                self.expected = status::START;
                self.phase = Phase::Address;
            }
            Phase::Address => {
                self.check(hw, errors);
                hw.write_byte(self.address);
                self.expected = match self.access {
                    Access::Write => status::MT_SLA_ACK,
                    Access::Read => status::MR_SLA_ACK,
                };
                self.phase = Phase::Data;
            }
            Phase::Data => {
                self.check(hw, errors);
                if let Some(&byte) = self.payload().get(self.cursor) {
                    hw.write_byte(byte);
                    self.cursor += 1;
                    self.expected = status::MT_DATA_ACK;
                } else {
                    self.phase = Phase::Stop;
                }
            }
            Phase::Stop => {
                self.check(hw, errors);
                hw.stop();
                self.phase = Phase::Idle;
            }
        }
    }

    /// Wait for the last condition to finish and compare its status
    fn check<H, E>(&self, hw: &mut H, errors: &mut E)
    where
        H: I2cController + ?Sized,
        E: ErrorSink + ?Sized,
    {
        let mut polls = 0u8;
        while !hw.is_ready() && polls < READY_POLL_LIMIT {
            polls += 1;
        }

        let current = hw.status();
        if polls >= READY_POLL_LIMIT {
            errors.push(Self::record(BusFault::timeout(self.expected), current));
        }
        if current != self.expected {
            errors.push(Self::record(BusFault::mismatch(self.expected), current));
        }
    }

    fn record(fault: BusFault, status: u8) -> ErrorRecord {
        ErrorRecord::new(ObjectId::Bus, fault as u8, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::ErrorLog;
    use crate::mock::{BusOp, MockI2c};

    static INIT: [u8; 3] = [0x00, 0xAE, 0xAF];

    fn run_to_idle(bus: &mut BusTransactor, hw: &mut MockI2c, log: &mut ErrorLog) -> usize {
        let mut steps = 0;
        while bus.is_busy() {
            bus.run(hw, log);
            steps += 1;
            assert!(steps < 1000, "transaction never finished");
        }
        steps
    }

    #[test]
    fn test_idle_run_does_nothing() {
        let mut bus = BusTransactor::new();
        let mut hw = MockI2c::new();
        let mut log = ErrorLog::<8>::new();
        bus.run(&mut hw, &mut log);
        assert!(hw.ops.is_empty());
        assert_eq!(bus.phase(), Phase::Idle);
    }

    #[test]
    fn test_rom_write_sequence() {
        let mut bus = BusTransactor::new();
        let mut hw = MockI2c::new();
        let mut log = ErrorLog::<8>::new();

        bus.send_write(0x3C, Source::Rom(&INIT)).unwrap();
        assert!(bus.is_busy());

        // Start, address, 3 data bytes, empty data step, stop
        assert_eq!(run_to_idle(&mut bus, &mut hw, &mut log), 7);
        assert_eq!(
            hw.ops,
            [
                BusOp::Start,
                BusOp::Write(0x78),
                BusOp::Write(0x00),
                BusOp::Write(0xAE),
                BusOp::Write(0xAF),
                BusOp::Stop,
            ]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_each_step_issues_one_condition() {
        let mut bus = BusTransactor::new();
        let mut hw = MockI2c::new();
        let mut log = ErrorLog::<8>::new();
        bus.send_write(0x3C, Source::Rom(&INIT)).unwrap();

        let phases = [Phase::Address, Phase::Data, Phase::Data];
        for expected in phases {
            bus.run(&mut hw, &mut log);
            assert_eq!(bus.phase(), expected);
        }
        assert_eq!(hw.ops.len(), 3);
    }

    #[test]
    fn test_ram_source_is_copied() {
        let mut bus = BusTransactor::new();
        let mut hw = MockI2c::new();
        let mut log = ErrorLog::<8>::new();

        let mut buf = [0x00, 0xB3];
        bus.send_write(0x3C, Source::Ram(&buf)).unwrap();
        // Caller may reuse its buffer right away
        buf[1] = 0xFF;
        run_to_idle(&mut bus, &mut hw, &mut log);

        assert_eq!(hw.written(), [0x78, 0x00, 0xB3]);
    }

    #[test]
    fn test_ram_source_too_long() {
        let mut bus = BusTransactor::new();
        let buf = [0u8; STAGING_CAPACITY + 1];
        assert_eq!(
            bus.send_write(0x3C, Source::Ram(&buf)),
            Err(BusError::SourceTooLong)
        );
        assert!(!bus.is_busy());
    }

    #[test]
    fn test_send_while_busy_is_rejected() {
        let mut bus = BusTransactor::new();
        let mut hw = MockI2c::new();
        let mut log = ErrorLog::<8>::new();

        bus.send_write(0x3C, Source::Rom(&INIT)).unwrap();
        bus.run(&mut hw, &mut log);
        bus.run(&mut hw, &mut log);
        bus.run(&mut hw, &mut log);
        let (phase, cursor, address) = (bus.phase(), bus.cursor(), bus.address_byte());

        assert_eq!(
            bus.send_write(0x10, Source::Ram(&[1, 2])),
            Err(BusError::Busy)
        );
        assert_eq!(bus.phase(), phase);
        assert_eq!(bus.cursor(), cursor);
        assert_eq!(bus.address_byte(), address);

        run_to_idle(&mut bus, &mut hw, &mut log);
        assert_eq!(hw.written(), [0x78, 0x00, 0xAE, 0xAF]);
    }

    #[test]
    fn test_read_direction_address() {
        let mut bus = BusTransactor::new();
        let mut hw = MockI2c::new();
        let mut log = ErrorLog::<8>::new();

        bus.send_read_write(0x3C, Source::Rom(&[0x00]), 4).unwrap();
        assert_eq!(bus.read_len(), 4);
        run_to_idle(&mut bus, &mut hw, &mut log);

        assert_eq!(hw.written(), [0x79, 0x00]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_nack_is_logged_and_transaction_continues() {
        let mut bus = BusTransactor::new();
        let mut hw = MockI2c::new();
        let mut log = ErrorLog::<8>::new();
        hw.nack_address = true;

        bus.send_write(0x3C, Source::Rom(&INIT)).unwrap();
        run_to_idle(&mut bus, &mut hw, &mut log);

        let rec = log.get(0).copied().unwrap();
        assert_eq!(rec.object, ObjectId::Bus);
        assert_eq!(rec.code, BusFault::MtSlaAckMismatch as u8);
        assert_eq!(rec.status, status::MT_SLA_NACK);
        // Data still went out
        assert_eq!(hw.ops.last(), Some(&BusOp::Stop));
    }

    #[test]
    fn test_data_nack_is_logged_and_transaction_continues() {
        let mut bus = BusTransactor::new();
        let mut hw = MockI2c::new();
        let mut log = ErrorLog::<8>::new();
        hw.nack_data = true;

        bus.send_write(0x3C, Source::Rom(&INIT)).unwrap();
        run_to_idle(&mut bus, &mut hw, &mut log);

        let rec = log.get(0).copied().unwrap();
        assert_eq!(rec.object, ObjectId::Bus);
        assert_eq!(rec.code, BusFault::MtDataAckMismatch as u8);
        assert_eq!(rec.status, status::MT_DATA_NACK);
        // One record per data byte, plus the re-check before stop
        assert_eq!(log.len(), INIT.len() + 1);
        assert_eq!(hw.written(), [0x78, 0x00, 0xAE, 0xAF]);
        assert_eq!(hw.ops.last(), Some(&BusOp::Stop));
    }

    #[test]
    fn test_data_phase_timeout_is_logged() {
        let mut bus = BusTransactor::new();
        let mut hw = MockI2c::new();
        let mut log = ErrorLog::<8>::new();

        bus.send_write(0x3C, Source::Rom(&[0xAE])).unwrap();
        bus.run(&mut hw, &mut log); // start
        bus.run(&mut hw, &mut log); // address
        hw.never_ready = true;
        bus.run(&mut hw, &mut log); // data: checks the address ack
        bus.run(&mut hw, &mut log); // data: checks the data ack
        assert_eq!(bus.phase(), Phase::Stop);
        bus.run(&mut hw, &mut log);

        let codes: std::vec::Vec<u8> = log.iter().map(|rec| rec.code).collect();
        assert_eq!(
            codes,
            [
                BusFault::MtSlaAckTimeout as u8,
                BusFault::MtDataAckTimeout as u8,
                BusFault::MtDataAckTimeout as u8,
            ]
        );
        assert_eq!(log.get(1).map(|rec| rec.status), Some(status::MT_DATA_ACK));
        assert_eq!(hw.ops.last(), Some(&BusOp::Stop));
        assert!(!bus.is_busy());
    }

    #[test]
    fn test_ready_timeout_is_logged() {
        let mut bus = BusTransactor::new();
        let mut hw = MockI2c::new();
        let mut log = ErrorLog::<8>::new();
        hw.never_ready = true;

        bus.send_write(0x3C, Source::Rom(&[])).unwrap();
        bus.run(&mut hw, &mut log); // start
        bus.run(&mut hw, &mut log); // address: checks START

        let rec = log.get(0).copied().unwrap();
        assert_eq!(rec.code, BusFault::StartTimeout as u8);
        assert_eq!(hw.ready_polls.get(), READY_POLL_LIMIT as usize + 1);
    }
}

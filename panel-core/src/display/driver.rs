//! Display streaming state machine

use panel_hal::OutputPin;

use super::images;
use super::sequence::{cmd, CONTROL_COMMAND, CONTROL_DATA, INIT_SEQUENCE};
use super::{PAGES, WIDTH};
use crate::bus::{BusError, BusTransactor, Source};
use crate::diag::{ErrorRecord, ErrorSink, ObjectId};

/// One page on the wire: data control byte plus a row of columns
pub const PAGE_STRIDE: usize = WIDTH + 1;

/// Complete paged frame
pub const FRAME_SIZE: usize = PAGES * PAGE_STRIDE;

/// Ticks to hold the power line low after releasing reset
pub const POWER_ON_TICKS: u16 = 100;

/// Ticks added on top of each transfer's byte count
const SETTLE_MARGIN: u16 = 3;

/// States a delay can resume into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resume {
    PoweringOn,
    Initializing,
    BufferFill,
    SetPage,
    Draw,
}

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// Drawing halted by [`DisplayDriver::stop`]
    Stopped,
    /// Raise the power line
    Starting,
    /// Drop the power line
    PoweringOn,
    /// Send the init sequence
    Initializing,
    /// Render the next image into the frame
    BufferFill,
    /// Select the page about to be drawn
    SetPage,
    /// Send the current page
    Draw,
    /// Wait for the last transfer to settle
    Delay { next: Resume },
}

impl From<Resume> for DisplayState {
    fn from(next: Resume) -> Self {
        match next {
            Resume::PoweringOn => DisplayState::PoweringOn,
            Resume::Initializing => DisplayState::Initializing,
            Resume::BufferFill => DisplayState::BufferFill,
            Resume::SetPage => DisplayState::SetPage,
            Resume::Draw => DisplayState::Draw,
        }
    }
}

/// Errors returned by the control operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Drawing is not in a cancellable state
    FailToStop,
    /// Drawing is not stopped
    FailToStart,
    /// A bus transaction is still in flight
    BusBusy,
}

/// Fault codes logged under [`ObjectId::Display`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisplayFault {
    /// A transfer was due but the bus was still busy
    BusBusy = 0x1,
    /// A transfer did not fit the bus staging buffer
    SourceTooLong = 0x2,
}

impl From<BusError> for DisplayFault {
    fn from(err: BusError) -> Self {
        match err {
            BusError::Busy => DisplayFault::BusBusy,
            BusError::SourceTooLong => DisplayFault::SourceTooLong,
        }
    }
}

/// OLED display driver
pub struct DisplayDriver {
    state: DisplayState,
    /// Ticks left in the current delay
    delay: u16,
    /// 7-bit bus address
    address: u8,
    power_settle_ticks: u16,
    /// Page about to be drawn
    page: u8,
    /// Start of that page within `frame`
    offset: usize,
    /// Which image the next fill uses
    odd_image: bool,
    /// A transfer found the bus busy and is being retried
    deferred: bool,
    frame: [u8; FRAME_SIZE],
}

impl DisplayDriver {
    /// Create a driver that starts its power-up sequence on the first run
    pub const fn new(address: u8, power_settle_ticks: u16) -> Self {
        Self {
            state: DisplayState::Starting,
            delay: 0,
            address,
            power_settle_ticks,
            page: 0,
            offset: 0,
            odd_image: false,
            deferred: false,
            frame: [0; FRAME_SIZE],
        }
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Page the next `SetPage`/`Draw` will use
    pub fn page(&self) -> u8 {
        self.page
    }

    /// Frame offset of that page
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Ticks left in the current delay
    pub fn delay_remaining(&self) -> u16 {
        self.delay
    }

    pub fn frame(&self) -> &[u8; FRAME_SIZE] {
        &self.frame
    }

    /// Halt drawing
    ///
    /// Only legal while pages are being streamed: in `SetPage`, `Draw`, or a
    /// delay that resumes into one of them.
    pub fn stop(&mut self) -> Result<(), DisplayError> {
        let drawing = matches!(
            self.state,
            DisplayState::SetPage
                | DisplayState::Draw
                | DisplayState::Delay {
                    next: Resume::SetPage | Resume::Draw
                }
        );
        if !drawing {
            return Err(DisplayError::FailToStop);
        }

        self.state = DisplayState::Stopped;
        Ok(())
    }

    /// Resume drawing from page 0 of the current frame
    pub fn start(&mut self) -> Result<(), DisplayError> {
        if self.state != DisplayState::Stopped {
            return Err(DisplayError::FailToStart);
        }

        self.reset_progress();
        self.deferred = false;
        self.state = DisplayState::SetPage;
        Ok(())
    }

    /// Send one control/data pair right away if the bus is free
    pub fn send_byte_secured(
        &self,
        bus: &mut BusTransactor,
        control: u8,
        data: u8,
    ) -> Result<(), DisplayError> {
        if bus.is_busy() {
            return Err(DisplayError::BusBusy);
        }
        bus.send_write(self.address, Source::Ram(&[control, data]))
            .map_err(|_| DisplayError::BusBusy)
    }

    /// Advance by one step
    pub fn run<P, E>(&mut self, bus: &mut BusTransactor, power: &mut P, errors: &mut E)
    where
        P: OutputPin + ?Sized,
        E: ErrorSink + ?Sized,
    {
        match self.state {
            DisplayState::Stopped => {}
            DisplayState::Starting => {
                power.set_high();
                self.delay_then(self.power_settle_ticks, Resume::PoweringOn);
            }
            DisplayState::PoweringOn => {
                power.set_low();
                self.delay_then(POWER_ON_TICKS, Resume::Initializing);
            }
            DisplayState::Initializing => {
                let sent = bus.send_write(self.address, Source::Rom(&INIT_SEQUENCE));
                if self.accepted(sent, errors) {
                    let ticks = INIT_SEQUENCE.len() as u16 + SETTLE_MARGIN;
                    self.delay_then(ticks, Resume::BufferFill);
                }
            }
            DisplayState::BufferFill => {
                self.fill(images::select(self.odd_image));
                self.odd_image = !self.odd_image;
                errors.clear();
                self.reset_progress();
                self.state = DisplayState::SetPage;
            }
            DisplayState::SetPage => {
                let select = [CONTROL_COMMAND, cmd::SET_PAGE_ADDR | self.page];
                let sent = bus.send_write(self.address, Source::Ram(&select));
                if self.accepted(sent, errors) {
                    self.delay_then(select.len() as u16 + SETTLE_MARGIN, Resume::Draw);
                }
            }
            DisplayState::Draw => {
                let end = self.offset + PAGE_STRIDE;
                // Staged by the bus, so the frame can be refilled later
                let sent = bus.send_write(self.address, Source::Ram(&self.frame[self.offset..end]));
                if self.accepted(sent, errors) {
                    self.page += 1;
                    self.offset = end;
                    let next = if self.page as usize >= PAGES {
                        Resume::BufferFill
                    } else {
                        Resume::SetPage
                    };
                    self.delay_then(PAGE_STRIDE as u16 + SETTLE_MARGIN, next);
                }
            }
            DisplayState::Delay { next } => {
                if self.delay > 0 {
                    self.delay -= 1;
                } else {
                    self.state = next.into();
                }
            }
        }
    }

    /// Settle a queued transfer; a busy bus is logged once per deferred transfer
    fn accepted<E>(&mut self, sent: Result<(), BusError>, errors: &mut E) -> bool
    where
        E: ErrorSink + ?Sized,
    {
        match sent {
            Ok(()) => {
                self.deferred = false;
                true
            }
            Err(BusError::Busy) => {
                if !self.deferred {
                    Self::log(errors, DisplayFault::BusBusy);
                    self.deferred = true;
                }
                false
            }
            Err(err) => {
                Self::log(errors, DisplayFault::from(err));
                false
            }
        }
    }

    fn log<E: ErrorSink + ?Sized>(errors: &mut E, fault: DisplayFault) {
        errors.push(ErrorRecord::new(ObjectId::Display, fault as u8, 0));
    }

    fn delay_then(&mut self, ticks: u16, next: Resume) {
        self.delay = ticks;
        self.state = DisplayState::Delay { next };
    }

    fn reset_progress(&mut self) {
        self.page = 0;
        self.offset = 0;
    }

    fn fill(&mut self, image: &images::Image) {
        for (page, chunk) in self.frame.chunks_exact_mut(PAGE_STRIDE).enumerate() {
            chunk[0] = CONTROL_DATA;
            chunk[1..].copy_from_slice(&image[page * WIDTH..(page + 1) * WIDTH]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{BusFault, Phase};
    use crate::diag::ErrorLog;
    use crate::mock::{MockI2c, MockPin};

    const SETTLE: u16 = 100;

    struct Rig {
        display: DisplayDriver,
        bus: BusTransactor,
        hw: MockI2c,
        power: MockPin,
        log: ErrorLog,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                display: DisplayDriver::new(0x3C, SETTLE),
                bus: BusTransactor::new(),
                hw: MockI2c::new(),
                power: MockPin::new(),
                log: ErrorLog::new(),
            }
        }

        /// One 1 ms tick: bus first, then the display
        fn tick(&mut self) {
            self.bus.run(&mut self.hw, &mut self.log);
            self.display
                .run(&mut self.bus, &mut self.power, &mut self.log);
        }

        fn tick_until(&mut self, state: DisplayState) -> usize {
            for n in 1..=20_000 {
                self.tick();
                if self.display.state() == state {
                    return n;
                }
            }
            panic!("never reached {:?}", state);
        }
    }

    #[test]
    fn test_frame_size() {
        assert_eq!(FRAME_SIZE, 1032);
    }

    #[test]
    fn test_boots_into_power_sequence() {
        let mut rig = Rig::new();
        assert_eq!(rig.display.state(), DisplayState::Starting);

        rig.tick();
        assert!(rig.power.is_set_high());
        assert_eq!(
            rig.display.state(),
            DisplayState::Delay {
                next: Resume::PoweringOn
            }
        );

        // Counter runs down to zero, then one more tick to leave the delay
        for _ in 0..=SETTLE {
            rig.tick();
        }
        assert_eq!(rig.display.state(), DisplayState::PoweringOn);
        rig.tick();
        assert!(rig.power.is_set_low());
    }

    #[test]
    fn test_init_sequence_is_sent_from_rom() {
        let mut rig = Rig::new();
        rig.tick_until(DisplayState::Initializing);
        rig.tick();
        assert!(rig.bus.is_busy());
        assert_eq!(rig.display.delay_remaining(), 35 + 3);

        rig.tick_until(DisplayState::BufferFill);
        let written = rig.hw.written();
        assert_eq!(written[0], 0x78);
        assert_eq!(&written[1..], &INIT_SEQUENCE[..]);
    }

    #[test]
    fn test_buffer_fill_layout() {
        let mut rig = Rig::new();
        rig.tick_until(DisplayState::BufferFill);
        rig.tick();

        let frame = rig.display.frame();
        for page in 0..PAGES {
            assert_eq!(frame[page * PAGE_STRIDE], CONTROL_DATA);
            assert_eq!(
                &frame[page * PAGE_STRIDE + 1..(page + 1) * PAGE_STRIDE],
                &images::CHIP[page * WIDTH..(page + 1) * WIDTH]
            );
        }
        assert_eq!(rig.display.state(), DisplayState::SetPage);
        assert_eq!(rig.display.page(), 0);
    }

    #[test]
    fn test_buffer_fill_clears_error_log() {
        let mut rig = Rig::new();
        rig.tick_until(DisplayState::BufferFill);
        rig.log.push(ErrorRecord::new(ObjectId::Bus, 1, 0));
        rig.tick();
        assert!(rig.log.is_empty());
    }

    #[test]
    fn test_page_cycle() {
        let mut rig = Rig::new();
        rig.tick_until(DisplayState::SetPage);
        rig.hw.ops.clear();

        rig.tick();
        assert_eq!(
            rig.display.state(),
            DisplayState::Delay {
                next: Resume::Draw
            }
        );
        assert_eq!(rig.display.delay_remaining(), 5);

        rig.tick_until(DisplayState::Draw);
        assert_eq!(rig.hw.written(), [0x78, CONTROL_COMMAND, 0xB0]);
        rig.hw.ops.clear();

        rig.tick();
        assert_eq!(rig.display.page(), 1);
        assert_eq!(rig.display.offset(), PAGE_STRIDE);
        assert_eq!(rig.display.delay_remaining(), 132);

        rig.tick_until(DisplayState::SetPage);
        let written = rig.hw.written();
        assert_eq!(written.len(), 1 + PAGE_STRIDE);
        assert_eq!(written[1], CONTROL_DATA);
    }

    #[test]
    fn test_images_alternate() {
        let mut rig = Rig::new();
        rig.tick_until(DisplayState::BufferFill);
        rig.tick();
        let first = rig.display.frame()[1..PAGE_STRIDE].to_vec();

        rig.tick_until(DisplayState::BufferFill);
        assert_eq!(rig.display.page() as usize, PAGES);
        rig.tick();
        let second = rig.display.frame()[1..PAGE_STRIDE].to_vec();

        assert_eq!(first.as_slice(), &images::CHIP[..WIDTH]);
        assert_eq!(second.as_slice(), &images::STRIPES[..WIDTH]);
    }

    #[test]
    fn test_stop_only_while_drawing() {
        let mut rig = Rig::new();
        assert_eq!(rig.display.stop(), Err(DisplayError::FailToStop));

        rig.tick_until(DisplayState::BufferFill);
        assert_eq!(rig.display.stop(), Err(DisplayError::FailToStop));

        rig.tick_until(DisplayState::Draw);
        assert_eq!(rig.display.stop(), Ok(()));
        assert_eq!(rig.display.state(), DisplayState::Stopped);

        // Stopped driver stays put
        rig.tick();
        assert_eq!(rig.display.state(), DisplayState::Stopped);
    }

    #[test]
    fn test_stop_during_page_delay() {
        let mut rig = Rig::new();
        rig.tick_until(DisplayState::SetPage);
        rig.tick();
        assert!(matches!(rig.display.state(), DisplayState::Delay { .. }));
        assert_eq!(rig.display.stop(), Ok(()));
    }

    #[test]
    fn test_start_resumes_from_page_zero() {
        let mut rig = Rig::new();
        assert_eq!(rig.display.start(), Err(DisplayError::FailToStart));

        rig.tick_until(DisplayState::SetPage);
        rig.tick_until(DisplayState::Draw);
        rig.tick();
        rig.tick_until(DisplayState::Draw);
        assert_eq!(rig.display.page(), 1);

        rig.display.stop().unwrap();
        rig.display.start().unwrap();
        assert_eq!(rig.display.state(), DisplayState::SetPage);
        assert_eq!(rig.display.page(), 0);
        assert_eq!(rig.display.offset(), 0);
        assert_eq!(rig.display.start(), Err(DisplayError::FailToStart));
    }

    #[test]
    fn test_send_byte_secured() {
        let mut rig = Rig::new();
        rig.display
            .send_byte_secured(&mut rig.bus, CONTROL_COMMAND, cmd::DISPLAY_OFF)
            .unwrap();
        assert_eq!(
            rig.display
                .send_byte_secured(&mut rig.bus, CONTROL_COMMAND, cmd::DISPLAY_ON),
            Err(DisplayError::BusBusy)
        );

        while rig.bus.is_busy() {
            rig.bus.run(&mut rig.hw, &mut rig.log);
        }
        assert_eq!(rig.hw.written(), [0x78, 0x00, 0xAE]);
    }

    #[test]
    fn test_busy_bus_defers_transfer() {
        let mut rig = Rig::new();
        rig.tick_until(DisplayState::SetPage);

        // Someone else grabbed the bus
        rig.bus.send_write(0x3C, Source::Rom(&[0x00, 0xA7])).unwrap();
        rig.display.run(&mut rig.bus, &mut rig.power, &mut rig.log);

        assert_eq!(rig.display.state(), DisplayState::SetPage);
        let rec = rig.log.get(0).copied().unwrap();
        assert_eq!(rec.object, ObjectId::Display);
        assert_eq!(rec.code, DisplayFault::BusBusy as u8);

        // The foreign transaction completes untouched
        while rig.bus.is_busy() {
            rig.bus.run(&mut rig.hw, &mut rig.log);
        }
        assert_eq!(rig.bus.phase(), Phase::Idle);
        assert_eq!(rig.hw.written().last(), Some(&0xA7));

        rig.display.run(&mut rig.bus, &mut rig.power, &mut rig.log);
        assert!(matches!(rig.display.state(), DisplayState::Delay { .. }));
    }

    #[test]
    fn test_deferred_transfer_logs_once() {
        let mut rig = Rig::new();
        rig.tick_until(DisplayState::Draw);
        rig.tick();
        // Page 0 is in flight; restart while it is still on the wire
        assert!(rig.bus.is_busy());
        rig.display.stop().unwrap();
        rig.display.start().unwrap();
        rig.hw.nack_address = true;

        rig.tick_until(DisplayState::Draw);
        rig.tick();
        rig.tick_until(DisplayState::SetPage);

        let count = |object: ObjectId, code: u8| {
            rig.log
                .iter()
                .filter(|rec| rec.object == object && rec.code == code)
                .count()
        };
        assert_eq!(count(ObjectId::Display, DisplayFault::BusBusy as u8), 1);
        // In-flight page, page select and the redrawn page all reach the log
        assert_eq!(count(ObjectId::Bus, BusFault::MtSlaAckMismatch as u8), 3);
        assert_eq!(rig.log.dropped(), 0);
    }

    #[test]
    fn test_full_cycle_has_no_bus_faults() {
        let mut rig = Rig::new();
        rig.tick_until(DisplayState::BufferFill);
        rig.tick();
        rig.tick_until(DisplayState::BufferFill);
        assert!(rig.log.is_empty());
    }
}

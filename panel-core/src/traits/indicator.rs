//! LED and buzzer traits

/// Bank of individually addressable status LEDs
pub trait StatusLeds {
    /// Number of LEDs; valid ids are `0..count()`
    fn count(&self) -> u8;

    /// Switch one LED
    ///
    /// Out-of-range ids are ignored; callers validate first.
    fn set(&mut self, id: u8, on: bool);

    /// Current state of one LED
    fn is_on(&self, id: u8) -> bool;
}

/// Timed buzzer
pub trait BuzzerControl {
    /// Sound for `ticks` buzzer ticks, restarting any beep in progress
    fn beep(&mut self, ticks: u8);

    /// True while a beep is sounding
    fn is_active(&self) -> bool;
}

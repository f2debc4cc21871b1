//! Buzzer output

use panel_core::traits::BuzzerControl;
use panel_hal::OutputPin;

/// Buzzer on a single pin, counted down from the 10 ms tier
pub struct Buzzer<P> {
    pin: P,
    /// Ticks left before the pin drops
    remaining: u8,
    active: bool,
}

impl<P: OutputPin> Buzzer<P> {
    pub fn new(mut pin: P) -> Self {
        pin.set_low();
        Self {
            pin,
            remaining: 0,
            active: false,
        }
    }

    /// Count down one tick; the pin drops on the tick after reaching zero
    pub fn run(&mut self) {
        if !self.active {
            return;
        }
        if self.remaining == 0 {
            self.pin.set_low();
            self.active = false;
        } else {
            self.remaining -= 1;
        }
    }
}

impl<P: OutputPin> BuzzerControl for Buzzer<P> {
    fn beep(&mut self, ticks: u8) {
        self.remaining = ticks;
        self.active = true;
        self.pin.set_high();
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

//! Status LEDs

use panel_core::traits::StatusLeds;
use panel_hal::OutputPin;

/// Fixed bank of active-high LEDs
pub struct LedBank<P, const N: usize> {
    pins: [P; N],
}

impl<P: OutputPin, const N: usize> LedBank<P, N> {
    /// Take ownership of the pins and switch every LED off
    pub fn new(mut pins: [P; N]) -> Self {
        for pin in pins.iter_mut() {
            pin.set_low();
        }
        Self { pins }
    }
}

impl<P: OutputPin, const N: usize> StatusLeds for LedBank<P, N> {
    fn count(&self) -> u8 {
        N as u8
    }

    fn set(&mut self, id: u8, on: bool) {
        if let Some(pin) = self.pins.get_mut(id as usize) {
            pin.set_state(on);
        }
    }

    fn is_on(&self, id: u8) -> bool {
        self.pins
            .get(id as usize)
            .map(|pin| pin.is_set_high())
            .unwrap_or(false)
    }
}

/// Run indicator toggled from the 100 ms tier
pub struct Heartbeat<P> {
    pin: P,
}

impl<P: OutputPin> Heartbeat<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn run(&mut self) {
        self.pin.toggle();
    }

    pub fn is_lit(&self) -> bool {
        self.pin.is_set_high()
    }
}

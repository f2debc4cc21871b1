//! Output pins

use embassy_rp::gpio::Output;
use panel_hal::OutputPin;

/// Push-pull output usable by the device adapters
pub struct Pin<'d>(Output<'d>);

impl<'d> Pin<'d> {
    pub fn new(output: Output<'d>) -> Self {
        Self(output)
    }
}

impl OutputPin for Pin<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn toggle(&mut self) {
        self.0.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

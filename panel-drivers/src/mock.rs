use panel_hal::OutputPin;

/// Mock GPIO pin for testing
#[derive(Debug, Default, Clone, Copy)]
pub struct MockPin {
    pub high: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self { high: false }
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

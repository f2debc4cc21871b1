//! Pin assignment for the Raspberry Pi Pico carrier board
//!
//! | Function            | GPIO      |
//! |---------------------|-----------|
//! | Host UART TX / RX   | 0 / 1     |
//! | Display SDA / SCL   | 4 / 5     |
//! | Display power       | 6         |
//! | Status LEDs 0..2    | 10, 11, 12|
//! | Buzzer              | 13        |
//! | Stepper coils A..D  | 16..19    |
//! | Heartbeat LED       | 25        |

use embassy_rp::gpio::{Flex, Level, Output};
use embassy_rp::peripherals::{
    PIN_10, PIN_11, PIN_12, PIN_13, PIN_16, PIN_17, PIN_18, PIN_19, PIN_25, PIN_4, PIN_5, PIN_6,
};
use embassy_rp::Peri;

use panel_core::bus::BusTransactor;
use panel_core::command::CommandDispatcher;
use panel_core::config::PanelConfig;
use panel_core::diag::ErrorLog;
use panel_core::display::{DisplayDriver, DisplayState};
use panel_drivers::buzzer::Buzzer;
use panel_drivers::lcd::{ErrorView, LcdShadow};
use panel_drivers::led::{Heartbeat, LedBank};
use panel_drivers::stepper::StepMotor;
use panel_hal_rp2040::{BitBangI2c, Pin};

/// Number of host-controlled status LEDs
pub const STATUS_LEDS: usize = 3;

/// GPIOs handed over by `main`
pub struct BoardPins {
    pub sda: Peri<'static, PIN_4>,
    pub scl: Peri<'static, PIN_5>,
    pub display_power: Peri<'static, PIN_6>,
    pub led0: Peri<'static, PIN_10>,
    pub led1: Peri<'static, PIN_11>,
    pub led2: Peri<'static, PIN_12>,
    pub buzzer: Peri<'static, PIN_13>,
    pub coil_a: Peri<'static, PIN_16>,
    pub coil_b: Peri<'static, PIN_17>,
    pub coil_c: Peri<'static, PIN_18>,
    pub coil_d: Peri<'static, PIN_19>,
    pub heartbeat: Peri<'static, PIN_25>,
}

fn output<T: embassy_rp::gpio::Pin>(pin: Peri<'static, T>) -> Pin<'static> {
    Pin::new(Output::new(pin, Level::Low))
}

/// Every device on the board plus the components that drive them
///
/// Owned by the scheduler task; the tier methods in
/// [`crate::tasks::scheduler`] borrow its fields.
pub struct Panel {
    pub i2c: BitBangI2c<'static>,
    pub bus: BusTransactor,
    pub display: DisplayDriver,
    pub display_power: Pin<'static>,
    pub display_state: DisplayState,
    pub errors: ErrorLog,
    pub dispatcher: CommandDispatcher,
    pub leds: LedBank<Pin<'static>, STATUS_LEDS>,
    pub buzzer: Buzzer<Pin<'static>>,
    pub motor: StepMotor<Pin<'static>>,
    pub lcd: LcdShadow,
    pub error_view: ErrorView,
    pub heartbeat: Heartbeat<Pin<'static>>,
}

impl Panel {
    pub fn new(pins: BoardPins, config: &PanelConfig) -> Self {
        let i2c = BitBangI2c::new(
            Flex::new(pins.scl),
            Flex::new(pins.sda),
            &config.i2c(),
            embassy_rp::clocks::clk_sys_freq(),
        );
        let display = DisplayDriver::new(config.display_address, config.power_settle_ticks);

        Self {
            i2c,
            bus: BusTransactor::new(),
            display_state: display.state(),
            display,
            display_power: output(pins.display_power),
            errors: ErrorLog::new(),
            dispatcher: CommandDispatcher::new(),
            leds: LedBank::new([output(pins.led0), output(pins.led1), output(pins.led2)]),
            buzzer: Buzzer::new(output(pins.buzzer)),
            motor: StepMotor::new(
                [
                    output(pins.coil_a),
                    output(pins.coil_b),
                    output(pins.coil_c),
                    output(pins.coil_d),
                ],
                config.motor_step_divider,
            ),
            lcd: LcdShadow::new(),
            error_view: ErrorView::new(),
            heartbeat: Heartbeat::new(output(pins.heartbeat)),
        }
    }
}

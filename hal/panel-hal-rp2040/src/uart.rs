//! Serial link configuration

use embassy_rp::uart::{Config, DataBits, Parity, StopBits};
use panel_hal::uart::{DataBits as LinkDataBits, Parity as LinkParity, StopBits as LinkStopBits};
use panel_hal::UartConfig;

/// Translate link settings into the embassy-rp UART config
pub fn uart_config(link: &UartConfig) -> Config {
    let mut cfg = Config::default();
    cfg.baudrate = link.baudrate;
    cfg.data_bits = match link.data_bits {
        LinkDataBits::Seven => DataBits::DataBits7,
        LinkDataBits::Eight => DataBits::DataBits8,
    };
    cfg.parity = match link.parity {
        LinkParity::None => Parity::ParityNone,
        LinkParity::Even => Parity::ParityEven,
        LinkParity::Odd => Parity::ParityOdd,
    };
    cfg.stop_bits = match link.stop_bits {
        LinkStopBits::One => StopBits::STOP1,
        LinkStopBits::Two => StopBits::STOP2,
    };
    cfg
}

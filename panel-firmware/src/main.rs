//! Instrument Panel - Firmware
//!
//! Main firmware binary for RP2040-based instrument panels. A host drives
//! status LEDs, a buzzer, a character LCD, a graphic display and a
//! stepper motor through framed ASCII commands on the serial link.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use panel_hal_rp2040::uart_config;

use crate::board::{BoardPins, Panel};
use crate::config::CONFIG;

mod board;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// UART driver buffers; the link keeps its own 64-byte rings on top
const UART_BUF_SIZE: usize = 64;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Panel firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");
    info!("Config: {}", CONFIG);

    // Host link
    let tx_buf = TX_BUF.init([0u8; UART_BUF_SIZE]);
    let rx_buf = RX_BUF.init([0u8; UART_BUF_SIZE]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config(&CONFIG.uart()));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", CONFIG.baudrate);

    let panel = Panel::new(
        BoardPins {
            sda: p.PIN_4,
            scl: p.PIN_5,
            display_power: p.PIN_6,
            led0: p.PIN_10,
            led1: p.PIN_11,
            led2: p.PIN_12,
            buzzer: p.PIN_13,
            coil_a: p.PIN_16,
            coil_b: p.PIN_17,
            coil_c: p.PIN_18,
            coil_d: p.PIN_19,
            heartbeat: p.PIN_25,
        },
        &CONFIG,
    );

    info!("Devices initialized");

    spawner.spawn(tasks::uart_rx_task(rx)).unwrap();
    spawner.spawn(tasks::uart_tx_task(tx)).unwrap();
    spawner.spawn(tasks::scheduler_task(panel)).unwrap();

    info!("All tasks spawned");
}

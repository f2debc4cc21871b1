//! Host UART receive task
//!
//! Feeds every received byte into the link's receive ring. Framing and
//! command handling happen later in the 10 ms tier.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use crate::channels::SERIAL;

/// Bytes pulled from the UART per read
const RX_CHUNK: usize = 16;

#[embassy_executor::task]
pub async fn uart_rx_task(mut rx: BufferedUartRx) {
    info!("UART RX task started");

    let mut buf = [0u8; RX_CHUNK];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);
                SERIAL.lock(|link| {
                    let mut link = link.borrow_mut();
                    for &byte in &buf[..n] {
                        link.on_receive(byte);
                    }
                });
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

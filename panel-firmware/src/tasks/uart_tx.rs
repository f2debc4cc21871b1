//! Host UART transmit task
//!
//! Sleeps until the scheduler kicks it, then drains the link's transmit
//! ring. Frames queued while draining are picked up by the same loop, so
//! only an idle transmitter ever needs a kick.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::{SERIAL, TX_KICK};

/// Bytes moved out of the ring per lock
const TX_CHUNK: usize = 16;

#[embassy_executor::task]
pub async fn uart_tx_task(mut tx: BufferedUartTx) {
    info!("UART TX task started");

    loop {
        TX_KICK.wait().await;

        loop {
            let mut chunk = [0u8; TX_CHUNK];
            let len = SERIAL.lock(|link| {
                let mut link = link.borrow_mut();
                let mut len = 0;
                while len < TX_CHUNK {
                    match link.pop_transmit() {
                        Some(byte) => {
                            chunk[len] = byte;
                            len += 1;
                        }
                        None => break,
                    }
                }
                len
            });

            if len == 0 {
                break;
            }

            if let Err(e) = tx.write_all(&chunk[..len]).await {
                warn!("UART write error: {:?}", e);
            }
        }

        trace!("TX drained");
    }
}

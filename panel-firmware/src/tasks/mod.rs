//! Embassy async tasks
//!
//! The UART tasks move bytes between the peripheral and the shared
//! [`SerialLink`](panel_protocol::SerialLink); everything else runs
//! cooperatively inside the scheduler task.

pub mod scheduler;
pub mod uart_rx;
pub mod uart_tx;

pub use scheduler::scheduler_task;
pub use uart_rx::uart_rx_task;
pub use uart_tx::uart_tx_task;

//! Fault recording
//!
//! Bus and display state machines report protocol deviations through
//! [`ErrorSink`]. They only ever append; reading the records back is the
//! job of whoever owns the sink.

pub mod log;

pub use log::{ErrorLog, ErrorRecord, ErrorSink, ObjectId, ERROR_LOG_CAPACITY};

//! Periodic task tiers
//!
//! One base tick per millisecond drives four independent tiers. Each tier
//! raises a flag that the firmware consumes with [`TaskTimer::take`].

pub mod timer;

pub use timer::{TaskTimer, Tier};

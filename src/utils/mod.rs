//! Utility functions and helpers
//!
//! Timestamp formatting and atomic file writes.

pub mod atomic;
pub mod time;

pub use atomic::atomic_write;
pub use time::now_stamp;

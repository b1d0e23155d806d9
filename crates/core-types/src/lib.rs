//! # Core Types
//!
//! Layer 0 data structures shared by every other crate: ledger snapshots, the
//! equity point, the exit-action vocabulary and time-window handling.

pub mod enums;
pub mod error;
pub mod structs;
pub mod time;
pub mod window;

// Re-export the core types to provide a clean public API.
pub use enums::ExitAction;
pub use error::CoreError;
pub use structs::{EquityPoint, RawSnapshot, TradeSnapshot, HOLD_ACTION};
pub use time::{epoch_to_iso, parse_iso_to_epoch, SECONDS_PER_DAY};
pub use window::{RequestedWindow, TimeWindow};

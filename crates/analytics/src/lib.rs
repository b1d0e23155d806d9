//! # Analytics Engine
//!
//! Turns a chronological ledger of trading snapshots into an equity curve and
//! a fixed set of performance and risk indicators.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `KpiEngine` takes an immutable slice of snapshots
//!   and builds a fresh `KpiRecord` per call. Nothing is cached between calls.
//! - **No numeric failures:** every division with a possible zero denominator has
//!   a defined fallback, and every reported number is finite.
//!
//! ## Public API
//!
//! - `KpiEngine`: orchestrates the calculators into one `KpiRecord`.
//! - `KpiRecord` / `EquityCurveReport`: the serializable results.
//! - `ledger`: the per-snapshot view used for trade listings.

pub mod drawdown;
pub mod engine;
pub mod equity;
pub mod ledger;
pub mod report;
pub mod returns;
pub mod risk;
pub mod trade_stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{EngineConfig, KpiEngine};
pub use ledger::{PageRequest, TradeEntry, TradePage, TradeQuery, TradeSort, TradeStatus};
pub use report::{EquityCurveReport, KpiRecord, WindowEdge};

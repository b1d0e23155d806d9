//! # Ledger Database Crate
//!
//! This crate is the Ledger Reader: a read-only, application-specific interface
//! to the SQLite `trade` table the trading bot appends to.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** This crate encapsulates all database-specific logic.
//!   It hands the rest of the application plain `TradeSnapshot`s, hiding the
//!   underlying SQL and nullable column handling.
//! - **Asynchronous & Pooled:** All operations are asynchronous over a
//!   `SqlitePool`, so concurrent requests each fetch their own snapshot set.
//!
//! ## Public API
//!
//! - `connect`: Builds the lazily-connecting ledger pool.
//! - `DbRepository`: Holds the pool and provides the windowed snapshot query,
//!   the lookup by id and the health ping.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::{DbRepository, LedgerRow};

//! Per-snapshot ledger view used by the trades listing.

use core_types::TradeSnapshot;
use serde::Serialize;
use std::cmp::Ordering;

/// A ledger snapshot as exposed to consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeEntry {
    /// The snapshot timestamp doubles as its identifier.
    pub id: i64,
    #[serde(with = "core_types::time::iso_seconds")]
    pub timestamp: i64,
    #[serde(with = "core_types::time::iso_seconds_option")]
    pub close_time: Option<i64>,
    pub action: String,
    pub position: f64,
    pub usdt: f64,
    pub trade_price: f64,
    /// Realized P&L, only reported for exits.
    pub pnl: Option<f64>,
    pub is_exit: bool,
    pub equity: f64,
    pub currency: String,
}

impl TradeEntry {
    pub fn from_snapshot(snapshot: &TradeSnapshot, currency: &str) -> Self {
        let is_exit = snapshot.is_exit();
        Self {
            id: snapshot.timestamp,
            timestamp: snapshot.timestamp,
            close_time: snapshot.close_time,
            action: snapshot.display_action().to_string(),
            position: snapshot.position,
            usdt: snapshot.cash,
            trade_price: snapshot.price,
            pnl: is_exit.then_some(snapshot.realized_pnl),
            is_exit,
            equity: snapshot.equity(),
            currency: currency.to_string(),
        }
    }
}

/// Which snapshots a listing includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TradeStatus {
    /// Non-exit events only.
    Open,
    /// Exit events only.
    Closed,
    #[default]
    All,
}

impl TradeStatus {
    /// Case-insensitive; anything unrecognised lists everything.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "OPEN" => TradeStatus::Open,
            "CLOSED" => TradeStatus::Closed,
            _ => TradeStatus::All,
        }
    }

    pub fn includes(&self, entry: &TradeEntry) -> bool {
        match self {
            TradeStatus::Open => !entry.is_exit,
            TradeStatus::Closed => entry.is_exit,
            TradeStatus::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Timestamp,
    CloseTime,
    Action,
    Position,
    Usdt,
    TradePrice,
    Pnl,
    IsExit,
    Equity,
    /// Unknown field: every entry compares equal, keeping the current order.
    Unsupported,
}

impl SortKey {
    fn from_field(field: &str) -> Self {
        match field {
            "timestamp" | "id" => SortKey::Timestamp,
            "close_time" => SortKey::CloseTime,
            "action" => SortKey::Action,
            "position" => SortKey::Position,
            "usdt" => SortKey::Usdt,
            "trade_price" => SortKey::TradePrice,
            "pnl" => SortKey::Pnl,
            "is_exit" => SortKey::IsExit,
            "equity" => SortKey::Equity,
            _ => SortKey::Unsupported,
        }
    }

    fn compare(&self, a: &TradeEntry, b: &TradeEntry) -> Ordering {
        match self {
            SortKey::Timestamp => a.timestamp.cmp(&b.timestamp),
            SortKey::CloseTime => a.close_time.cmp(&b.close_time),
            SortKey::Action => a.action.cmp(&b.action),
            SortKey::Position => a.position.total_cmp(&b.position),
            SortKey::Usdt => a.usdt.total_cmp(&b.usdt),
            SortKey::TradePrice => a.trade_price.total_cmp(&b.trade_price),
            SortKey::Pnl => a.pnl.unwrap_or(0.0).total_cmp(&b.pnl.unwrap_or(0.0)),
            SortKey::IsExit => a.is_exit.cmp(&b.is_exit),
            SortKey::Equity => a.equity.total_cmp(&b.equity),
            SortKey::Unsupported => Ordering::Equal,
        }
    }
}

/// A `+field` / `-field` sort specification; no sign means ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeSort {
    pub key: SortKey,
    pub descending: bool,
}

impl Default for TradeSort {
    fn default() -> Self {
        Self {
            key: SortKey::Timestamp,
            descending: true,
        }
    }
}

impl TradeSort {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            key: SortKey::from_field(raw.trim_start_matches(['+', '-'])),
            descending: raw.starts_with('-'),
        }
    }

    /// Stable sort: entries that compare equal keep their relative order in
    /// both directions.
    pub fn apply(&self, entries: &mut [TradeEntry]) {
        if self.descending {
            entries.sort_by(|a, b| self.key.compare(b, a));
        } else {
            entries.sort_by(|a, b| self.key.compare(a, b));
        }
    }
}

/// A clamped `limit`/`offset` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl PageRequest {
    /// Missing values take the defaults; `limit` is clamped into
    /// `[1, max_limit]` and a negative `offset` becomes zero.
    pub fn clamped(
        limit: Option<i64>,
        offset: Option<i64>,
        default_limit: usize,
        max_limit: usize,
    ) -> Self {
        let max_limit = max_limit.max(1);
        let limit = limit
            .map(|l| l.clamp(1, max_limit as i64) as usize)
            .unwrap_or_else(|| default_limit.clamp(1, max_limit));
        let offset = offset.map(|o| o.max(0) as usize).unwrap_or(0);
        Self { limit, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeQuery {
    pub status: TradeStatus,
    pub sort: TradeSort,
    pub page: PageRequest,
}

/// One page of the listing plus the total number of matching entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradePage {
    pub count: usize,
    pub items: Vec<TradeEntry>,
}

impl TradePage {
    pub fn paginate(entries: Vec<TradeEntry>, page: PageRequest) -> Self {
        let count = entries.len();
        let items = entries
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect();
        Self { count, items }
    }
}

use crate::enums::ExitAction;
use serde::{Deserialize, Serialize};

/// Label shown for snapshots whose action column is empty.
pub const HOLD_ACTION: &str = "Hold";

/// A ledger row exactly as stored: every numeric column may be null.
///
/// This is the only shape that should ever carry `Option` numerics. Convert it
/// with `TradeSnapshot::from` before doing any arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSnapshot {
    pub timestamp: i64,
    #[serde(default)]
    pub position: Option<f64>,
    #[serde(default, alias = "usdt")]
    pub cash: Option<f64>,
    #[serde(default, alias = "trade_price")]
    pub price: Option<f64>,
    #[serde(default)]
    pub close_time: Option<i64>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, alias = "pnl")]
    pub realized_pnl: Option<f64>,
}

/// One immutable ledger event with nulls already coerced to `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSnapshot {
    /// Epoch seconds; the ordering key of the ledger.
    pub timestamp: i64,
    /// Signed quantity held after the event (negative = short).
    pub position: f64,
    pub cash: f64,
    /// Reference price used to mark the position.
    pub price: f64,
    pub close_time: Option<i64>,
    /// Trimmed action label; empty when the ledger had none.
    pub action: String,
    /// Only meaningful when `exit_action()` is `Some`.
    pub realized_pnl: f64,
}

impl From<RawSnapshot> for TradeSnapshot {
    fn from(raw: RawSnapshot) -> Self {
        Self {
            timestamp: raw.timestamp,
            position: raw.position.unwrap_or(0.0),
            cash: raw.cash.unwrap_or(0.0),
            price: raw.price.unwrap_or(0.0),
            close_time: raw.close_time,
            action: raw.action.map(|a| a.trim().to_string()).unwrap_or_default(),
            realized_pnl: raw.realized_pnl.unwrap_or(0.0),
        }
    }
}

impl TradeSnapshot {
    /// Mark-to-market equity: cash plus the value of the open position.
    pub fn equity(&self) -> f64 {
        self.cash + self.position * self.price
    }

    pub fn exit_action(&self) -> Option<ExitAction> {
        self.action.parse().ok()
    }

    pub fn is_exit(&self) -> bool {
        self.exit_action().is_some()
    }

    /// The label shown to consumers: `"Hold"` stands in for an empty action.
    pub fn display_action(&self) -> &str {
        if self.action.is_empty() {
            HOLD_ACTION
        } else {
            &self.action
        }
    }
}

/// A point on the equity curve, derived 1:1 from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquityPoint {
    #[serde(rename = "ts", with = "crate::time::iso_seconds")]
    pub timestamp: i64,
    pub equity: f64,
}

impl From<&TradeSnapshot> for EquityPoint {
    fn from(snapshot: &TradeSnapshot) -> Self {
        Self {
            timestamp: snapshot.timestamp,
            equity: snapshot.equity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_coerce_to_zero_at_conversion() {
        let snapshot = TradeSnapshot::from(RawSnapshot {
            timestamp: 10,
            ..RawSnapshot::default()
        });
        assert_eq!(snapshot.position, 0.0);
        assert_eq!(snapshot.cash, 0.0);
        assert_eq!(snapshot.price, 0.0);
        assert_eq!(snapshot.realized_pnl, 0.0);
        assert_eq!(snapshot.equity(), 0.0);
        assert_eq!(snapshot.action, "");
        assert_eq!(snapshot.display_action(), HOLD_ACTION);
    }

    #[test]
    fn equity_marks_short_positions() {
        let snapshot = TradeSnapshot::from(RawSnapshot {
            timestamp: 1,
            position: Some(-2.0),
            cash: Some(1_000.0),
            price: Some(150.0),
            ..RawSnapshot::default()
        });
        assert_eq!(snapshot.equity(), 700.0);
    }

    #[test]
    fn action_is_trimmed_before_classification() {
        let snapshot = TradeSnapshot::from(RawSnapshot {
            timestamp: 1,
            action: Some("  Trailing Stop Sell ".to_string()),
            ..RawSnapshot::default()
        });
        assert_eq!(snapshot.exit_action(), Some(ExitAction::TrailingStopSell));
        assert_eq!(snapshot.display_action(), "Trailing Stop Sell");
    }

    #[test]
    fn non_exit_labels_are_kept_for_display() {
        let snapshot = TradeSnapshot::from(RawSnapshot {
            timestamp: 1,
            action: Some("Buy".to_string()),
            ..RawSnapshot::default()
        });
        assert!(!snapshot.is_exit());
        assert_eq!(snapshot.display_action(), "Buy");
    }

    #[test]
    fn raw_snapshot_accepts_ledger_column_names() {
        let raw: RawSnapshot = serde_json::from_str(
            r#"{"timestamp": 5, "usdt": 100.5, "trade_price": null, "pnl": 3.0, "action": "Sell"}"#,
        )
        .unwrap();
        assert_eq!(raw.cash, Some(100.5));
        assert_eq!(raw.price, None);
        assert_eq!(raw.realized_pnl, Some(3.0));
        assert_eq!(raw.position, None);
    }

    #[test]
    fn equity_point_serializes_iso_timestamp() {
        let point = EquityPoint {
            timestamp: 86_400,
            equity: 1_100.0,
        };
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json["ts"], "1970-01-02T00:00:00Z");
        assert_eq!(json["equity"], 1_100.0);
    }
}

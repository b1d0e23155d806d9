use crate::DbError;
use core_types::{RawSnapshot, TimeWindow, TradeSnapshot};
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::{FromRow, QueryBuilder};

// Numeric columns are cast so that values stored with INTEGER affinity still
// decode as REAL; NULL survives the cast.
const SELECT_LEDGER_COLUMNS: &str = "SELECT CAST(timestamp AS INTEGER) AS timestamp, \
     CAST(position AS REAL) AS position, CAST(usdt AS REAL) AS usdt, \
     CAST(trade_price AS REAL) AS trade_price, CAST(close_time AS INTEGER) AS close_time, \
     action, CAST(pnl AS REAL) AS pnl FROM trade";

/// A row of the `trade` table, column for column.
#[derive(Debug, Clone, FromRow)]
pub struct LedgerRow {
    pub timestamp: i64,
    pub position: Option<f64>,
    pub usdt: Option<f64>,
    pub trade_price: Option<f64>,
    pub close_time: Option<i64>,
    pub action: Option<String>,
    pub pnl: Option<f64>,
}

impl From<LedgerRow> for RawSnapshot {
    fn from(row: LedgerRow) -> Self {
        Self {
            timestamp: row.timestamp,
            position: row.position,
            cash: row.usdt,
            price: row.trade_price,
            close_time: row.close_time,
            action: row.action,
            realized_pnl: row.pnl,
        }
    }
}

impl From<LedgerRow> for TradeSnapshot {
    fn from(row: LedgerRow) -> Self {
        TradeSnapshot::from(RawSnapshot::from(row))
    }
}

/// The `DbRepository` provides a high-level, read-only interface to the trade
/// ledger. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetches every snapshot inside the inclusive window, ascending by
    /// timestamp. Rows sharing a timestamp keep their storage order.
    pub async fn load_snapshots(&self, window: &TimeWindow) -> Result<Vec<TradeSnapshot>, DbError> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_LEDGER_COLUMNS);
        query.push(" WHERE 1 = 1");
        if let Some(start) = window.start {
            query.push(" AND timestamp >= ").push_bind(start);
        }
        if let Some(end) = window.end {
            query.push(" AND timestamp <= ").push_bind(end);
        }
        query.push(" ORDER BY timestamp ASC, rowid ASC");

        let rows: Vec<LedgerRow> = query.build_query_as().fetch_all(&self.pool).await?;
        tracing::debug!(
            count = rows.len(),
            start = ?window.start,
            end = ?window.end,
            "Loaded ledger snapshots."
        );

        Ok(rows.into_iter().map(TradeSnapshot::from).collect())
    }

    /// Fetches the snapshot whose timestamp (its id) matches exactly.
    pub async fn get_snapshot(&self, timestamp: i64) -> Result<TradeSnapshot, DbError> {
        let row = sqlx::query_as::<_, LedgerRow>(&format!(
            "{SELECT_LEDGER_COLUMNS} WHERE timestamp = ? ORDER BY rowid ASC LIMIT 1"
        ))
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| if let sqlx::Error::RowNotFound = e { DbError::NotFound } else { e.into() })?;

        Ok(row.into())
    }

    /// Round-trips a trivial query to prove the ledger is reachable.
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

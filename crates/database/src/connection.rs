use configuration::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use std::time::Duration;

/// Builds the connection pool for the SQLite trade ledger.
///
/// Connections are opened lazily, on first use, so a missing or unreadable
/// ledger surfaces as a `DbError` on the request that hits it rather than
/// at startup. The reader never creates the file. The pool runs in WAL mode so
/// reads do not block the process that appends to the ledger.
pub fn connect(settings: &DatabaseSettings) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(&settings.path)
        .create_if_missing(false)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .pragma("temp_store", "MEMORY");

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options);

    tracing::info!(path = %settings.path.display(), "Configured trade ledger pool.");
    pool
}

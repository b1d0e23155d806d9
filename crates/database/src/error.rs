use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Ledger query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("The requested data was not found in the database.")]
    NotFound,
}

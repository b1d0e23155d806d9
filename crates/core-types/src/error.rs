use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Timestamp {0} is outside the representable UTC range")]
    TimestampOutOfRange(i64),

    #[error("Unknown exit action: '{0}'")]
    UnknownExitAction(String),
}

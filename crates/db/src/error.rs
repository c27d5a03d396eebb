#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid store uri: {0}")]
    InvalidUri(String),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("store task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

use thiserror::Error;

/// Errors a repository can report
///
/// "Not found" is not an error: lookups return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique constraint was violated; carries the offending field
    #[error("{field} already exists: {value}")]
    Conflict { field: &'static str, value: String },

    /// A referenced row does not exist
    #[error("Referenced {0} does not exist")]
    MissingReference(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

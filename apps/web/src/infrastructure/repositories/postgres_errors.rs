use crate::domain::repositories::RepositoryError;

/// Translates a write failure into a repository error.
///
/// Unique violations become [`RepositoryError::Conflict`]; `field_for`
/// picks the field name from the violated constraint.
pub(crate) fn write_error(
    err: sqlx::Error,
    value: &str,
    field_for: impl FnOnce(&str) -> &'static str,
) -> RepositoryError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return RepositoryError::Conflict {
                field: field_for(db.constraint().unwrap_or_default()),
                value: value.to_string(),
            };
        }
    }

    RepositoryError::Database(err)
}

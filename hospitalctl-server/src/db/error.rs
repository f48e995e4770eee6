//! Database error taxonomy

/// Database error type
///
/// `Connection` and `Storage` are kept apart so callers can tell an
/// unreachable store from a statement the store rejected.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Postgres SQLSTATE of the underlying failure, if any.
    pub fn sqlstate(&self) -> Option<String> {
        match self {
            Self::Connection(e) | Self::Storage(e) => e
                .as_database_error()
                .and_then(|db| db.code())
                .map(|code| code.into_owned()),
            Self::NotFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("patient", 42);
        assert_eq!(err.to_string(), "not found: patient '42'");
        assert!(err.sqlstate().is_none());
    }

    #[test]
    fn sqlx_errors_default_to_storage() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::Storage(_)));
    }
}

//! Error types for sqlbind operations.

use thiserror::Error;

/// Result type alias using [`SqlBindError`].
pub type Result<T> = std::result::Result<T, SqlBindError>;

/// Error types for parameter binding and statement execution.
#[derive(Debug, Error)]
pub enum SqlBindError {
    // ==================== Binding Errors ====================
    /// The value kind is known but cannot be bound (null markers, narrow integers, chars).
    #[error("Unsupported parameter type at position {position}: {type_name}")]
    UnsupportedParameterType {
        position: usize,
        type_name: &'static str,
    },

    /// The value kind matches no case the binder recognizes.
    #[error("Unknown parameter type at position {position}: {type_name}")]
    UnknownParameterType {
        position: usize,
        type_name: &'static str,
    },

    /// Number of placeholders in the statement differs from the number of values.
    #[error("Placeholder count mismatch: statement has {placeholders} placeholders, got {values} values")]
    PlaceholderCountMismatch { placeholders: usize, values: usize },

    // ==================== Execution Errors ====================
    /// A bound parameter name does not occur in the prepared statement.
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Error reported by the SQLite driver.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl SqlBindError {
    /// Returns true for errors raised while building a parameter set.
    #[must_use]
    pub fn is_bind_error(&self) -> bool {
        matches!(
            self,
            SqlBindError::UnsupportedParameterType { .. }
                | SqlBindError::UnknownParameterType { .. }
                | SqlBindError::PlaceholderCountMismatch { .. }
        )
    }
}

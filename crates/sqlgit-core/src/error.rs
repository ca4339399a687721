//! Error types for the snapshot model.

/// Errors raised while building a snapshot from raw column metadata.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// A table was described without any columns.
    #[error("Table has no columns")]
    EmptyTable,

    /// The same column name appeared twice in one table.
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),

    /// The `Key` field held a code other than "", PRI, UNI or MUL.
    #[error("Unknown key kind '{0}'")]
    UnknownKey(String),

    /// The `Null` field held something other than YES or NO.
    #[error("Invalid nullability '{0}', expected YES or NO")]
    InvalidNullability(String),

    /// An invariant violation inside a named table.
    #[error("Table '{table}': {source}")]
    InTable {
        /// Table the violation was found in.
        table: String,
        /// The underlying violation.
        #[source]
        source: Box<SnapshotError>,
    },
}

impl SnapshotError {
    /// Attaches the table name to this error.
    #[must_use]
    pub fn in_table(self, table: impl Into<String>) -> Self {
        Self::InTable {
            table: table.into(),
            source: Box::new(self),
        }
    }
}

/// Result type for snapshot construction.
pub type Result<T> = std::result::Result<T, SnapshotError>;

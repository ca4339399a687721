//! Error types for sqlgit.

use sqlgit_core::SnapshotError;

use crate::store::StoreError;

/// Errors that can occur while saving or merging a schema.
#[derive(Debug, thiserror::Error)]
pub enum SqlGitError {
    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Could not connect to the database.
    #[error("Could not connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Reading the live schema failed.
    #[error("Could not introspect schema '{database}': {source}")]
    Introspect {
        /// Schema being introspected.
        database: String,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },

    /// Introspected or stored metadata broke a snapshot invariant.
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Loading or saving the snapshot file failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A statement failed during merge; the transaction was rolled back.
    #[error("Statement failed: {statement}: {source}")]
    Statement {
        /// SQL text of the failing statement.
        statement: String,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },

    /// Other database error (transaction begin/commit).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for sqlgit operations.
pub type Result<T> = std::result::Result<T, SqlGitError>;

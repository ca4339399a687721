//! MySQL schema introspection.
//!
//! Reads `information_schema` for one schema and builds a [`Snapshot`].
//! Only base tables are read: unlike `SHOW TABLES`, views are left out,
//! since they have no columns of their own to recreate. Each column
//! record carries the six fields `DESCRIBE` reports, `Extra` unchanged
//! (including MySQL 8's `DEFAULT_GENERATED` marker).

use std::collections::BTreeMap;

use sqlgit_core::{ColumnSpec, Introspect, Snapshot, SnapshotError, TableSpec};
use sqlx::mysql::MySqlPool;
use tracing::{debug, info};

use crate::error::{Result, SqlGitError};

const TABLES_SQL: &str = "SELECT TABLE_NAME FROM information_schema.tables \
     WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE' \
     ORDER BY TABLE_NAME";

const COLUMNS_SQL: &str = "SELECT TABLE_NAME, COLUMN_NAME, COLUMN_TYPE, IS_NULLABLE, \
     COLUMN_KEY, COLUMN_DEFAULT, EXTRA \
     FROM information_schema.columns \
     WHERE TABLE_SCHEMA = ? \
     ORDER BY TABLE_NAME, ORDINAL_POSITION";

/// One row of the column query, i.e. one `DESCRIBE` record plus its table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ColumnRecord {
    /// Owning table.
    #[sqlx(rename = "TABLE_NAME")]
    pub table: String,
    /// `Field`.
    #[sqlx(rename = "COLUMN_NAME")]
    pub field: String,
    /// `Type`.
    #[sqlx(rename = "COLUMN_TYPE")]
    pub column_type: String,
    /// `Null`.
    #[sqlx(rename = "IS_NULLABLE")]
    pub null: String,
    /// `Key`.
    #[sqlx(rename = "COLUMN_KEY")]
    pub key: String,
    /// `Default`.
    #[sqlx(rename = "COLUMN_DEFAULT")]
    pub default_value: Option<String>,
    /// `Extra`.
    #[sqlx(rename = "EXTRA")]
    pub extra: Option<String>,
}

impl ColumnRecord {
    fn to_column(&self) -> std::result::Result<ColumnSpec, SnapshotError> {
        ColumnSpec::from_describe(
            &self.field,
            &self.column_type,
            &self.null,
            &self.key,
            self.default_value.as_deref(),
            self.extra.as_deref(),
        )
    }
}

/// Assembles a snapshot from the table list and the column records.
///
/// Records must arrive in ordinal order within each table. Records of
/// tables not in `tables` (views) are ignored.
pub fn build_snapshot(
    tables: &[String],
    records: &[ColumnRecord],
) -> std::result::Result<Snapshot, SnapshotError> {
    let mut columns: BTreeMap<&str, Vec<ColumnSpec>> = tables
        .iter()
        .map(|name| (name.as_str(), Vec::new()))
        .collect();

    for record in records {
        if let Some(list) = columns.get_mut(record.table.as_str()) {
            list.push(
                record
                    .to_column()
                    .map_err(|e| e.in_table(record.table.as_str()))?,
            );
        }
    }

    columns
        .into_iter()
        .map(|(name, cols)| {
            TableSpec::new(cols)
                .map(|table| (name.to_string(), table))
                .map_err(|e| e.in_table(name))
        })
        .collect()
}

/// Introspects a MySQL schema.
#[derive(Debug, Clone)]
pub struct MySqlIntrospector {
    pool: MySqlPool,
    database: String,
}

impl MySqlIntrospector {
    /// Creates an introspector for `database` on `pool`.
    pub fn new(pool: MySqlPool, database: impl Into<String>) -> Self {
        Self {
            pool,
            database: database.into(),
        }
    }

    fn introspect_error(&self, source: sqlx::Error) -> SqlGitError {
        SqlGitError::Introspect {
            database: self.database.clone(),
            source,
        }
    }
}

impl Introspect for MySqlIntrospector {
    type Error = SqlGitError;

    async fn introspect(&self) -> Result<Snapshot> {
        let tables: Vec<String> = sqlx::query_scalar(TABLES_SQL)
            .bind(&self.database)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| self.introspect_error(e))?;
        debug!(count = tables.len(), "Tables listed");

        let records: Vec<ColumnRecord> = sqlx::query_as(COLUMNS_SQL)
            .bind(&self.database)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| self.introspect_error(e))?;

        let snapshot = build_snapshot(&tables, &records)?;
        info!(
            database = %self.database,
            tables = snapshot.len(),
            columns = records.len(),
            "Schema introspected"
        );
        Ok(snapshot)
    }
}

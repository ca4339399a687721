//! Migration executor.
//!
//! Runs a planned statement sequence against the live database inside one
//! transaction. Statements run in exactly the order the differ produced
//! them; the first failure aborts and rolls back the whole sequence.

use sqlgit_core::Statement;
use sqlx::mysql::MySqlPool;
use tracing::{debug, error, info};

use crate::error::{Result, SqlGitError};

/// Executes statement sequences against a database.
#[derive(Debug, Clone)]
pub struct MigrationExecutor {
    pool: MySqlPool,
    dry_run: bool,
}

impl MigrationExecutor {
    /// Creates a new executor.
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            dry_run: false,
        }
    }

    /// Enables dry-run mode (SQL is printed but not executed).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Applies `statements` in order inside one transaction and returns
    /// how many were executed. The statements are printed to stdout once
    /// the transaction has committed.
    pub async fn apply(&self, statements: &[Statement]) -> Result<usize> {
        if statements.is_empty() {
            info!("Schema already up to date");
            return Ok(0);
        }

        if self.dry_run {
            info!(
                count = statements.len(),
                "Dry run mode - SQL will be printed but not executed"
            );
            print_statements(statements);
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for (position, statement) in statements.iter().enumerate() {
            debug!(
                position,
                kind = %statement.kind(),
                sql = %statement,
                "Executing SQL"
            );
            if let Err(source) = sqlx::raw_sql(statement.sql()).execute(&mut *tx).await {
                error!(
                    position,
                    sql = %statement,
                    error = %source,
                    "Statement failed, rolling back"
                );
                // Dropping the transaction rolls it back.
                return Err(SqlGitError::Statement {
                    statement: statement.sql().to_string(),
                    source,
                });
            }
        }
        tx.commit().await?;

        info!(count = statements.len(), "Merge committed");
        print_statements(statements);
        Ok(statements.len())
    }
}

fn print_statements(statements: &[Statement]) {
    for statement in statements {
        println!("{statement};");
    }
}

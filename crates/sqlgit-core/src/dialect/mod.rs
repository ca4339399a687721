//! DDL dialects.
//!
//! A dialect turns snapshot data into complete statements. Only MySQL is
//! modeled; the trait is the seam where another engine would plug in.

mod mysql;

pub use mysql::MySqlDialect;

use crate::snapshot::{ColumnSpec, TableSpec};
use crate::statement::Statement;

/// Trait for database-specific DDL generation.
///
/// Every method is pure and total over well-formed snapshot data.
pub trait DdlDialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Quote an identifier (table name, column name).
    fn quote_identifier(&self, name: &str) -> String;

    /// Quote a string literal.
    fn quote_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Generates the column definition fragment used by `CREATE TABLE`,
    /// `ADD` and `CHANGE`.
    fn column_definition(&self, column: &ColumnSpec) -> String {
        let mut parts = vec![
            self.quote_identifier(&column.name),
            column.column_type.clone(),
        ];

        if !column.nullable {
            parts.push("NOT NULL".to_string());
        }

        if let Some(default) = &column.default_value {
            if column.has_expression_default() {
                parts.push(format!("DEFAULT ({default})"));
            } else {
                parts.push(format!("DEFAULT {}", self.quote_literal(default)));
            }
        }

        if let Some(extra) = column.definition_extra() {
            parts.push(extra);
        }

        parts.join(" ")
    }

    /// `CREATE TABLE` with every column of `table`, in its order.
    fn create_table(&self, name: &str, table: &TableSpec) -> Statement;

    /// `DROP TABLE`.
    fn drop_table(&self, name: &str) -> Statement;

    /// Adds `column` to `table`.
    fn create_column(&self, table: &str, column: &ColumnSpec) -> Statement;

    /// Drops `column` from `table`.
    fn drop_column(&self, table: &str, column: &ColumnSpec) -> Statement;

    /// Redefines `column` in place. The column keeps its name.
    fn alter_column(&self, table: &str, column: &ColumnSpec) -> Statement;

    /// Adds the single-column index described by `column.key_kind`, or
    /// `None` if the column is not indexed.
    fn create_index(&self, table: &str, column: &ColumnSpec) -> Option<Statement>;

    /// Drops the index carried by `column`.
    fn drop_index(&self, table: &str, column: &ColumnSpec) -> Statement;
}

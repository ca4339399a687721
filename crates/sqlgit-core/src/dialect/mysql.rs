//! MySQL dialect.
//!
//! Column types, defaults and extras are emitted exactly as `DESCRIBE`
//! reported them, so a statement recreates what was introspected.

use crate::snapshot::{ColumnSpec, KeyKind, TableSpec};
use crate::statement::{Statement, StatementKind};

use super::DdlDialect;

/// MySQL DDL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn alter_table(&self, table: &str) -> String {
        format!("ALTER TABLE {}", self.quote_identifier(table))
    }
}

impl DdlDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn create_table(&self, name: &str, table: &TableSpec) -> Statement {
        let mut defs = Vec::with_capacity(table.len() + 1);
        for column in table.columns() {
            defs.push(self.column_definition(column));
            if column.key_kind == KeyKind::Primary {
                defs.push(format!(
                    "PRIMARY KEY ({})",
                    self.quote_identifier(&column.name)
                ));
            }
        }

        let sql = format!(
            "CREATE TABLE {} ({})",
            self.quote_identifier(name),
            defs.join(", ")
        );
        Statement::new(StatementKind::CreateTable, name, sql)
    }

    fn drop_table(&self, name: &str) -> Statement {
        let sql = format!("DROP TABLE {}", self.quote_identifier(name));
        Statement::new(StatementKind::DropTable, name, sql)
    }

    fn create_column(&self, table: &str, column: &ColumnSpec) -> Statement {
        let sql = format!(
            "{} ADD {}",
            self.alter_table(table),
            self.column_definition(column)
        );
        Statement::new(StatementKind::AddColumn, table, sql)
    }

    fn drop_column(&self, table: &str, column: &ColumnSpec) -> Statement {
        let sql = format!(
            "{} DROP {}",
            self.alter_table(table),
            self.quote_identifier(&column.name)
        );
        Statement::new(StatementKind::DropColumn, table, sql)
    }

    fn alter_column(&self, table: &str, column: &ColumnSpec) -> Statement {
        let sql = format!(
            "{} CHANGE {} {}",
            self.alter_table(table),
            self.quote_identifier(&column.name),
            self.column_definition(column)
        );
        Statement::new(StatementKind::ChangeColumn, table, sql)
    }

    fn create_index(&self, table: &str, column: &ColumnSpec) -> Option<Statement> {
        let keyword = match column.key_kind {
            KeyKind::None => return None,
            KeyKind::Primary => "PRIMARY KEY",
            KeyKind::Unique => "UNIQUE",
            KeyKind::Indexed => "INDEX",
        };
        let sql = format!(
            "{} ADD {} ({})",
            self.alter_table(table),
            keyword,
            self.quote_identifier(&column.name)
        );
        Some(Statement::new(StatementKind::AddIndex, table, sql))
    }

    fn drop_index(&self, table: &str, column: &ColumnSpec) -> Statement {
        // The primary index is always named PRIMARY, never after its column.
        let sql = if column.key_kind == KeyKind::Primary {
            format!("{} DROP PRIMARY KEY", self.alter_table(table))
        } else {
            format!(
                "{} DROP INDEX {}",
                self.alter_table(table),
                self.quote_identifier(&column.name)
            )
        };
        Statement::new(StatementKind::DropIndex, table, sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialect() -> MySqlDialect {
        MySqlDialect::new()
    }

    #[test]
    fn test_column_definition_minimal() {
        let col = ColumnSpec::new("age", "int(11)");
        assert_eq!(dialect().column_definition(&col), "`age` int(11)");
    }

    #[test]
    fn test_column_definition_full() {
        let col = ColumnSpec::new("status", "varchar(16)")
            .not_null()
            .default_value("new")
            .extra("on update CURRENT_TIMESTAMP");
        assert_eq!(
            dialect().column_definition(&col),
            "`status` varchar(16) NOT NULL DEFAULT 'new' on update CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_column_definition_escapes() {
        let col = ColumnSpec::new("we`ird", "varchar(8)").default_value("it's");
        assert_eq!(
            dialect().column_definition(&col),
            "`we``ird` varchar(8) DEFAULT 'it''s'"
        );
    }

    #[test]
    fn test_column_definition_expression_default() {
        let col = ColumnSpec::new("token", "varchar(36)")
            .not_null()
            .default_value("uuid()")
            .extra("DEFAULT_GENERATED");
        assert_eq!(
            dialect().column_definition(&col),
            "`token` varchar(36) NOT NULL DEFAULT (uuid())"
        );

        let col = ColumnSpec::new("updated_at", "timestamp")
            .default_value("CURRENT_TIMESTAMP")
            .extra("DEFAULT_GENERATED on update CURRENT_TIMESTAMP");
        assert_eq!(
            dialect().column_definition(&col),
            "`updated_at` timestamp DEFAULT (CURRENT_TIMESTAMP) on update CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_create_table_with_primary_key() {
        let table = TableSpec::new(vec![
            ColumnSpec::new("id", "int(11)")
                .primary_key()
                .extra("auto_increment"),
            ColumnSpec::new("name", "varchar(255)").not_null(),
        ])
        .unwrap();

        let stmt = dialect().create_table("users", &table);
        assert_eq!(stmt.kind(), StatementKind::CreateTable);
        assert_eq!(stmt.table(), "users");
        assert_eq!(
            stmt.sql(),
            "CREATE TABLE `users` (`id` int(11) NOT NULL auto_increment, \
             PRIMARY KEY (`id`), `name` varchar(255) NOT NULL)"
        );
    }

    #[test]
    fn test_drop_table() {
        assert_eq!(dialect().drop_table("users").sql(), "DROP TABLE `users`");
    }

    #[test]
    fn test_add_and_drop_column() {
        let col = ColumnSpec::new("email", "varchar(255)").not_null();
        assert_eq!(
            dialect().create_column("users", &col).sql(),
            "ALTER TABLE `users` ADD `email` varchar(255) NOT NULL"
        );
        assert_eq!(
            dialect().drop_column("users", &col).sql(),
            "ALTER TABLE `users` DROP `email`"
        );
    }

    #[test]
    fn test_alter_column_reuses_name() {
        let col = ColumnSpec::new("age", "bigint(20)").default_value("0");
        let stmt = dialect().alter_column("users", &col);
        assert_eq!(stmt.kind(), StatementKind::ChangeColumn);
        assert_eq!(
            stmt.sql(),
            "ALTER TABLE `users` CHANGE `age` `age` bigint(20) DEFAULT '0'"
        );
    }

    #[test]
    fn test_create_index_by_key_kind() {
        let d = dialect();
        let col = ColumnSpec::new("email", "varchar(255)");

        assert!(d.create_index("users", &col).is_none());
        assert_eq!(
            d.create_index("users", &col.clone().unique()).unwrap().sql(),
            "ALTER TABLE `users` ADD UNIQUE (`email`)"
        );
        assert_eq!(
            d.create_index("users", &col.clone().indexed()).unwrap().sql(),
            "ALTER TABLE `users` ADD INDEX (`email`)"
        );
        assert_eq!(
            d.create_index("users", &col.primary_key()).unwrap().sql(),
            "ALTER TABLE `users` ADD PRIMARY KEY (`email`)"
        );
    }

    #[test]
    fn test_drop_index() {
        let d = dialect();
        let col = ColumnSpec::new("email", "varchar(255)").unique();
        assert_eq!(
            d.drop_index("users", &col).sql(),
            "ALTER TABLE `users` DROP INDEX `email`"
        );

        let pk = ColumnSpec::new("id", "int(11)").primary_key();
        assert_eq!(
            d.drop_index("users", &pk).sql(),
            "ALTER TABLE `users` DROP PRIMARY KEY"
        );
    }
}

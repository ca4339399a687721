//! Schema differ.
//!
//! Compares a saved snapshot (the desired state) with the current one
//! (the live state) and produces the statements that turn current into
//! saved. The walk is split in two passes: creations and alterations
//! over `saved`, then deletions over `current`. Every statement of the
//! first pass precedes every statement of the second, so a table always
//! exists before its columns change and a column always exists before an
//! index on it is added. Renames are not detected: a renamed column is a
//! drop plus a create.

use tracing::{debug, info};

use crate::dialect::{DdlDialect, MySqlDialect};
use crate::snapshot::{KeyKind, Snapshot};
use crate::statement::Statement;

/// Diffs snapshots and synthesizes DDL through a dialect.
#[derive(Debug, Clone, Default)]
pub struct SchemaDiffer<D: DdlDialect> {
    dialect: D,
}

impl<D: DdlDialect> SchemaDiffer<D> {
    /// Creates a differ rendering through `dialect`.
    #[must_use]
    pub const fn new(dialect: D) -> Self {
        Self { dialect }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Returns the ordered statements that transform `current` into `saved`.
    ///
    /// Neither snapshot is modified. Equal snapshots produce no statements.
    #[must_use]
    pub fn diff(&self, saved: &Snapshot, current: &Snapshot) -> Vec<Statement> {
        let mut statements = Vec::new();
        self.creations(saved, current, &mut statements);
        let created = statements.len();
        self.deletions(saved, current, &mut statements);

        info!(
            dialect = self.dialect.name(),
            creations = created,
            deletions = statements.len() - created,
            "Schema diff computed"
        );
        statements
    }

    /// Pass 1: walk `saved`, creating what is missing and altering what
    /// changed.
    fn creations(&self, saved: &Snapshot, current: &Snapshot, out: &mut Vec<Statement>) {
        for (name, saved_table) in saved.tables() {
            let Some(current_table) = current.get(name) else {
                push(out, self.dialect.create_table(name, saved_table));
                continue;
            };

            for column in saved_table.columns() {
                match current_table.column(&column.name) {
                    None => push(out, self.dialect.create_column(name, column)),
                    Some(existing) if column.differs_from(existing) => {
                        push(out, self.dialect.alter_column(name, column));
                        if let Some(index) = self.dialect.create_index(name, column) {
                            push(out, index);
                        }
                    }
                    Some(_) => {}
                }
            }
        }
    }

    /// Pass 2: walk `current`, dropping what `saved` no longer has.
    fn deletions(&self, saved: &Snapshot, current: &Snapshot, out: &mut Vec<Statement>) {
        for (name, current_table) in current.tables() {
            let Some(saved_table) = saved.get(name) else {
                push(out, self.dialect.drop_table(name));
                continue;
            };

            for column in current_table.columns() {
                match saved_table.column(&column.name) {
                    None => push(out, self.dialect.drop_column(name, column)),
                    Some(kept)
                        if column.key_kind.is_indexed() && kept.key_kind == KeyKind::None =>
                    {
                        push(out, self.dialect.drop_index(name, column));
                    }
                    Some(_) => {}
                }
            }
        }
    }
}

fn push(out: &mut Vec<Statement>, statement: Statement) {
    debug!(
        kind = %statement.kind(),
        table = statement.table(),
        sql = %statement,
        "Planned statement"
    );
    out.push(statement);
}

/// Diffs two snapshots with the MySQL dialect.
#[must_use]
pub fn diff(saved: &Snapshot, current: &Snapshot) -> Vec<Statement> {
    SchemaDiffer::new(MySqlDialect::new()).diff(saved, current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ColumnSpec, TableSpec};
    use crate::statement::StatementKind;

    fn table(columns: Vec<ColumnSpec>) -> TableSpec {
        TableSpec::new(columns).unwrap()
    }

    fn users() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("id", "int(11)").primary_key(),
            ColumnSpec::new("name", "varchar(255)").not_null(),
        ]
    }

    fn sql(statements: &[Statement]) -> Vec<&str> {
        statements.iter().map(Statement::sql).collect()
    }

    #[test]
    fn test_no_changes() {
        let schema = Snapshot::new().table("users", table(users()));
        assert!(diff(&schema, &schema).is_empty());
        assert!(diff(&Snapshot::new(), &Snapshot::new()).is_empty());
    }

    #[test]
    fn test_detect_new_table() {
        let saved = Snapshot::new().table("users", table(users()));
        let ops = diff(&saved, &Snapshot::new());

        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind(), StatementKind::CreateTable);
        assert!(ops[0].sql().starts_with("CREATE TABLE `users` ("));
    }

    #[test]
    fn test_new_table_is_one_statement() {
        let mut cols = users();
        cols.push(ColumnSpec::new("email", "varchar(255)").unique());
        let saved = Snapshot::new().table("users", table(cols));

        let ops = diff(&saved, &Snapshot::new());
        assert_eq!(
            sql(&ops),
            ["CREATE TABLE `users` (`id` int(11) NOT NULL, PRIMARY KEY (`id`), \
              `name` varchar(255) NOT NULL, `email` varchar(255))"]
        );
    }

    #[test]
    fn test_detect_dropped_table() {
        let current = Snapshot::new().table("users", table(users()));
        let ops = diff(&Snapshot::new(), &current);
        assert_eq!(sql(&ops), ["DROP TABLE `users`"]);
    }

    #[test]
    fn test_detect_new_column() {
        let saved = Snapshot::new().table("users", table(users()));
        let current = Snapshot::new().table("users", table(users()[..1].to_vec()));
        let ops = diff(&saved, &current);
        assert_eq!(
            sql(&ops),
            ["ALTER TABLE `users` ADD `name` varchar(255) NOT NULL"]
        );
    }

    #[test]
    fn test_new_keyed_column_is_added_without_index() {
        let mut cols = users();
        cols.push(ColumnSpec::new("email", "varchar(255)").unique());
        let saved = Snapshot::new().table("users", table(cols));
        let current = Snapshot::new().table("users", table(users()));

        let ops = diff(&saved, &current);
        assert_eq!(sql(&ops), ["ALTER TABLE `users` ADD `email` varchar(255)"]);
    }

    #[test]
    fn test_detect_dropped_column() {
        let mut cols = users();
        cols.push(ColumnSpec::new("age", "int(11)"));
        let saved = Snapshot::new().table("users", table(users()));
        let current = Snapshot::new().table("users", table(cols));

        let ops = diff(&saved, &current);
        assert_eq!(sql(&ops), ["ALTER TABLE `users` DROP `age`"]);
    }

    #[test]
    fn test_detect_column_type_change() {
        let saved = Snapshot::new().table(
            "users",
            table(vec![ColumnSpec::new("id", "bigint(20)").primary_key()]),
        );
        let current = Snapshot::new().table(
            "users",
            table(vec![ColumnSpec::new("id", "int(11)").primary_key()]),
        );

        let ops = diff(&saved, &current);
        assert_eq!(
            sql(&ops),
            [
                "ALTER TABLE `users` CHANGE `id` `id` bigint(20) NOT NULL",
                "ALTER TABLE `users` ADD PRIMARY KEY (`id`)",
            ]
        );
    }

    #[test]
    fn test_key_added_alters_then_indexes() {
        let email = ColumnSpec::new("email", "varchar(255)").not_null();
        let saved = Snapshot::new().table("users", table(vec![email.clone().unique()]));
        let current = Snapshot::new().table("users", table(vec![email]));

        let ops = diff(&saved, &current);
        assert_eq!(
            sql(&ops),
            [
                "ALTER TABLE `users` CHANGE `email` `email` varchar(255) NOT NULL",
                "ALTER TABLE `users` ADD UNIQUE (`email`)",
            ]
        );
    }

    #[test]
    fn test_key_removed_drops_index_in_second_pass() {
        let email = ColumnSpec::new("email", "varchar(255)");
        let saved = Snapshot::new().table("users", table(vec![email.clone()]));
        let current = Snapshot::new().table("users", table(vec![email.unique()]));

        let ops = diff(&saved, &current);
        let kinds: Vec<_> = ops.iter().map(Statement::kind).collect();
        assert_eq!(kinds, [StatementKind::ChangeColumn, StatementKind::DropIndex]);
        assert_eq!(ops[1].sql(), "ALTER TABLE `users` DROP INDEX `email`");
    }

    #[test]
    fn test_creations_precede_deletions() {
        let saved = Snapshot::new()
            .table("a_new", table(vec![ColumnSpec::new("id", "int(11)")]))
            .table(
                "z_kept",
                table(vec![
                    ColumnSpec::new("id", "int(11)"),
                    ColumnSpec::new("added", "text"),
                ]),
            );
        let current = Snapshot::new()
            .table("a_old", table(vec![ColumnSpec::new("id", "int(11)")]))
            .table(
                "z_kept",
                table(vec![
                    ColumnSpec::new("id", "int(11)"),
                    ColumnSpec::new("removed", "text"),
                ]),
            );

        let ops = diff(&saved, &current);
        let kinds: Vec<_> = ops.iter().map(Statement::kind).collect();
        assert_eq!(
            kinds,
            [
                StatementKind::CreateTable,
                StatementKind::AddColumn,
                StatementKind::DropTable,
                StatementKind::DropColumn,
            ]
        );
        assert_eq!(ops[2].table(), "a_old");
    }

    #[test]
    fn test_columns_follow_snapshot_order() {
        let saved = Snapshot::new().table(
            "t",
            table(vec![
                ColumnSpec::new("id", "int(11)"),
                ColumnSpec::new("zeta", "int(11)"),
                ColumnSpec::new("alpha", "int(11)"),
            ]),
        );
        let current = Snapshot::new().table("t", table(vec![ColumnSpec::new("id", "int(11)")]));

        let ops = diff(&saved, &current);
        assert_eq!(
            sql(&ops),
            [
                "ALTER TABLE `t` ADD `zeta` int(11)",
                "ALTER TABLE `t` ADD `alpha` int(11)",
            ]
        );
    }
}

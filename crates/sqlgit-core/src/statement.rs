//! Rendered DDL statements.

use std::fmt;

/// What a statement does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `CREATE TABLE`.
    CreateTable,
    /// `DROP TABLE`.
    DropTable,
    /// `ALTER TABLE ... ADD <column>`.
    AddColumn,
    /// `ALTER TABLE ... DROP <column>`.
    DropColumn,
    /// `ALTER TABLE ... CHANGE <column>`.
    ChangeColumn,
    /// `ALTER TABLE ... ADD {PRIMARY KEY|UNIQUE|INDEX}`.
    AddIndex,
    /// `ALTER TABLE ... DROP {INDEX|PRIMARY KEY}`.
    DropIndex,
}

impl StatementKind {
    /// Short label used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreateTable => "create table",
            Self::DropTable => "drop table",
            Self::AddColumn => "add column",
            Self::DropColumn => "drop column",
            Self::ChangeColumn => "change column",
            Self::AddIndex => "add index",
            Self::DropIndex => "drop index",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One DDL statement. Displays as its SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    kind: StatementKind,
    table: String,
    sql: String,
}

impl Statement {
    /// Creates a statement.
    #[must_use]
    pub fn new(kind: StatementKind, table: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            kind,
            table: table.into(),
            sql: sql.into(),
        }
    }

    /// What the statement does.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// The table the statement targets.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The SQL text, without a trailing semicolon.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Consumes the statement, returning its SQL text.
    #[must_use]
    pub fn into_sql(self) -> String {
        self.sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

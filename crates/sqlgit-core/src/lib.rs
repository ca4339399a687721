//! Schema snapshots, diffing and DDL synthesis.
//!
//! `sqlgit-core` is the pure half of sqlgit: it never touches a database.
//! Given a saved [`Snapshot`] (the desired schema) and a current one (the
//! live schema), [`SchemaDiffer`] produces the ordered DDL [`Statement`]s
//! that turn current into saved.
//!
//! # Architecture
//!
//! - **Snapshot** - tables, columns and their single-column keys
//! - **Dialect** - renders column definitions and complete statements
//! - **Differ** - two-pass walk producing creations, then deletions
//! - **Introspect / SnapshotStore** - traits implemented by driver code
//!
//! # Example
//!
//! ```rust
//! use sqlgit_core::prelude::*;
//!
//! let users = TableSpec::new(vec![
//!     ColumnSpec::new("id", "int(11)").primary_key().extra("auto_increment"),
//!     ColumnSpec::new("email", "varchar(255)").not_null().unique(),
//! ])
//! .unwrap();
//!
//! let saved = Snapshot::new().table("users", users);
//! let current = Snapshot::new();
//!
//! let statements = SchemaDiffer::new(MySqlDialect::new()).diff(&saved, &current);
//! assert_eq!(
//!     statements[0].sql(),
//!     "CREATE TABLE `users` (`id` int(11) NOT NULL auto_increment, PRIMARY KEY (`id`), \
//!      `email` varchar(255) NOT NULL)"
//! );
//! assert_eq!(statements.len(), 1);
//! ```

pub mod dialect;
pub mod diff;
pub mod error;
pub mod introspect;
pub mod snapshot;
pub mod statement;
pub mod store;

pub use dialect::{DdlDialect, MySqlDialect};
pub use diff::SchemaDiffer;
pub use error::SnapshotError;
pub use introspect::Introspect;
pub use snapshot::{ColumnSpec, DEFAULT_GENERATED, KeyKind, Snapshot, TableSpec};
pub use statement::{Statement, StatementKind};
pub use store::SnapshotStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::dialect::{DdlDialect, MySqlDialect};
    pub use crate::diff::{SchemaDiffer, diff};
    pub use crate::error::SnapshotError;
    pub use crate::introspect::Introspect;
    pub use crate::snapshot::{ColumnSpec, KeyKind, Snapshot, TableSpec};
    pub use crate::statement::{Statement, StatementKind};
    pub use crate::store::SnapshotStore;
}

//! Schema version control for MySQL.
//!
//! `sqlgit` saves the structure of a live schema to a snapshot file and
//! later merges it back: the saved snapshot is diffed against the live
//! schema and the resulting DDL runs inside one transaction.
//!
//! # Architecture
//!
//! - **Config** - connection settings passed by value, no globals
//! - **Introspect** - reads `information_schema` into a snapshot
//! - **Store** - versioned JSON snapshot file, optional history copies
//! - **Commands** - the save and merge workflows
//! - **Executor** - transactional statement execution
//!
//! The diff and DDL synthesis live in [`sqlgit_core`].
//!
//! # CLI Usage
//!
//! ```bash
//! # Save the current schema to ./schema
//! sqlgit -u root -p secret -d shop -s
//!
//! # Show what a merge would run
//! sqlgit -u root -p secret -d shop -m --dry-run
//!
//! # Bring the live schema back to the saved one
//! sqlgit -u root -p secret -d shop -m
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod introspect;
pub mod store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::commands::{plan_merge, save};
    pub use crate::config::ConnectionConfig;
    pub use crate::error::{Result, SqlGitError};
    pub use crate::executor::MigrationExecutor;
    pub use crate::introspect::MySqlIntrospector;
    pub use crate::store::{JsonSnapshotStore, SnapshotFile, StoreError};
    pub use sqlgit_core::prelude::*;
}

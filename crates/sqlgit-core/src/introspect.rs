//! Schema introspection trait.
//!
//! Driver code implements [`Introspect`] to read the live schema. The
//! core crate defines only the trait so it stays driver-agnostic.

use std::future::Future;

use crate::snapshot::Snapshot;

/// Introspects a live database to produce the current [`Snapshot`].
pub trait Introspect {
    /// Error type for introspection failures.
    type Error: std::error::Error;

    /// Reads every table and column of the target schema.
    fn introspect(&self) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send;
}

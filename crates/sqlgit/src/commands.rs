//! Save and merge workflows.
//!
//! Both are generic over the introspection and storage seams so they run
//! the same against MySQL and against in-memory stand-ins.

use sqlgit_core::{Introspect, MySqlDialect, SchemaDiffer, Snapshot, SnapshotStore, Statement};
use tracing::{info, warn};

use crate::error::{Result, SqlGitError};

/// Introspects the live schema and stores it as the saved snapshot.
pub async fn save<I, S>(introspector: &I, store: &S) -> Result<Snapshot>
where
    I: Introspect,
    S: SnapshotStore,
    SqlGitError: From<I::Error> + From<S::Error>,
{
    let current = introspector.introspect().await?;
    store.save(&current)?;
    info!(tables = current.len(), "Current schema saved");
    Ok(current)
}

/// Computes the statements that bring the live schema back to the saved
/// one.
///
/// Returns `None` when nothing was ever saved: there is nothing to merge.
pub async fn plan_merge<I, S>(introspector: &I, store: &S) -> Result<Option<Vec<Statement>>>
where
    I: Introspect,
    S: SnapshotStore,
    SqlGitError: From<I::Error> + From<S::Error>,
{
    let Some(saved) = store.load()? else {
        warn!("No saved schema found, nothing to merge");
        return Ok(None);
    };
    let current = introspector.introspect().await?;

    let statements = SchemaDiffer::new(MySqlDialect::new()).diff(&saved, &current);
    Ok(Some(statements))
}

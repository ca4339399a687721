//! Snapshot persistence trait.

use crate::snapshot::Snapshot;

/// Loads and saves the saved snapshot.
pub trait SnapshotStore {
    /// Error type for storage failures.
    type Error: std::error::Error;

    /// Returns the saved snapshot, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<Snapshot>, Self::Error>;

    /// Persists `snapshot`, replacing the previously saved one.
    fn save(&self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

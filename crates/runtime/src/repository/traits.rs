//! Repository contracts for saving and loading creature records.

use super::error::Result;
use super::types::{CreatureId, CreatureRecord};

/// Snapshot persistence port.
///
/// Implementations only store and fetch; the single-writer discipline is
/// enforced by [`CreatureService`](crate::CreatureService), which holds the
/// per-creature lock around every load/save pair.
pub trait CreatureRepository: Send + Sync {
    /// Save (create or replace) a record.
    fn save(&self, record: &CreatureRecord) -> Result<()>;

    /// Load a record by id.
    fn load(&self, id: &CreatureId) -> Result<Option<CreatureRecord>>;

    /// Check if a record exists.
    fn exists(&self, id: &CreatureId) -> bool;

    /// Delete a record. Deleting a missing record is not an error.
    fn delete(&self, id: &CreatureId) -> Result<()>;

    /// List stored ids in ascending order.
    fn list_ids(&self) -> Result<Vec<CreatureId>>;
}

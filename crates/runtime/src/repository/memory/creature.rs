use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::repository::{CreatureId, CreatureRecord, CreatureRepository, RepositoryError, Result};

/// In-memory implementation of CreatureRepository.
pub struct InMemoryCreatureRepo {
    records: RwLock<BTreeMap<CreatureId, CreatureRecord>>,
}

impl InMemoryCreatureRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryCreatureRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl CreatureRepository for InMemoryCreatureRepo {
    fn save(&self, record: &CreatureRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn load(&self, id: &CreatureId) -> Result<Option<CreatureRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(id).cloned())
    }

    fn exists(&self, id: &CreatureId) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(id))
            .unwrap_or(false)
    }

    fn delete(&self, id: &CreatureId) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.remove(id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<CreatureId>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.keys().cloned().collect())
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{CreatureId, CreatureRecord, CreatureRepository, RepositoryError, Result};

/// File-based implementation of CreatureRepository.
///
/// # File Format
///
/// Each creature is stored as `{id}.json`, pretty-printed JSON with
/// camelCase field names. Writes go to `{id}.json.tmp` first and are then
/// renamed over the old file, so a crash never leaves a half-written record.
pub struct FileCreatureRepository {
    base_dir: PathBuf,
}

impl FileCreatureRepository {
    /// Create a new file-based repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, id: &CreatureId) -> PathBuf {
        self.base_dir.join(format!("{}.json", id))
    }
}

impl CreatureRepository for FileCreatureRepository {
    fn save(&self, record: &CreatureRecord) -> Result<()> {
        let path = self.record_path(&record.id);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved creature[{}] to {}", record.id, path.display());

        Ok(())
    }

    fn load(&self, id: &CreatureId) -> Result<Option<CreatureRecord>> {
        let path = self.record_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let record: CreatureRecord = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        if &record.id != id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds creature {}",
                path.display(),
                record.id
            )));
        }

        tracing::debug!("Loaded creature[{}] from {}", id, path.display());

        Ok(Some(record))
    }

    fn exists(&self, id: &CreatureId) -> bool {
        self.record_path(id).exists()
    }

    fn delete(&self, id: &CreatureId) -> Result<()> {
        let path = self.record_path(id);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted creature[{}]", id);
        }

        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<CreatureId>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(stem) = filename.strip_suffix(".json")
                && let Ok(id) = stem.parse::<CreatureId>()
            {
                ids.push(id);
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vpet_core::{SnapshotBuilder, SpeciesDef, Stage};

    fn record(name: &str) -> CreatureRecord {
        let egg = SpeciesDef::new("Digitama", Stage::Digitama);
        CreatureRecord::new(
            name.parse().unwrap(),
            SnapshotBuilder::new(&egg).born_at(1_000).build(),
            42,
        )
    }

    #[test]
    fn save_load_list_delete() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCreatureRepository::new(dir.path().join("saves")).unwrap();
        let pico = record("pico");

        repo.save(&pico).unwrap();
        repo.save(&record("agu")).unwrap();
        assert!(!dir.path().join("saves/pico.json.tmp").exists());

        assert_eq!(repo.load(&pico.id).unwrap(), Some(pico.clone()));
        assert_eq!(
            repo.list_ids().unwrap(),
            vec!["agu".parse().unwrap(), "pico".parse().unwrap()]
        );

        repo.delete(&pico.id).unwrap();
        assert!(!repo.exists(&pico.id));
        assert_eq!(repo.load(&pico.id).unwrap(), None);
    }

    #[test]
    fn persisted_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCreatureRepository::new(dir.path()).unwrap();
        repo.save(&record("pico")).unwrap();

        let text = fs::read_to_string(dir.path().join("pico.json")).unwrap();
        assert!(text.contains("\"lastCheckpointEpochMs\": 1000"));
        assert!(text.contains("\"battleNonce\": 0"));
    }

    #[test]
    fn mismatched_id_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCreatureRepository::new(dir.path()).unwrap();
        repo.save(&record("pico")).unwrap();
        fs::rename(dir.path().join("pico.json"), dir.path().join("other.json")).unwrap();

        let err = repo.load(&"other".parse().unwrap()).unwrap_err();
        assert!(matches!(err, RepositoryError::CorruptedData(_)));
    }
}

//! Content factory for loading every data file from one directory.

use std::path::{Path, PathBuf};

use vpet_core::{EngineConfig, QuestBook, SpeciesTable};

use crate::loaders::{ConfigLoader, LoadResult, QuestLoader, SpeciesLoader};

/// Everything a host needs to run creatures.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: EngineConfig,
    pub species: SpeciesTable,
    pub quests: QuestBook,
}

/// Content factory that loads all pet content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── species.ron
/// └── quests.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(crate::BUNDLED_DATA_DIR)
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the species table from `species.ron`.
    pub fn load_species(&self) -> LoadResult<SpeciesTable> {
        let path = self.data_dir.join("species.ron");
        SpeciesLoader::load(&path)
    }

    /// Load quest areas from `quests.ron`.
    pub fn load_quests(&self) -> LoadResult<QuestBook> {
        let path = self.data_dir.join("quests.ron");
        QuestLoader::load(&path)
    }

    /// Loads all three files.
    pub fn load_all(&self) -> LoadResult<Content> {
        Ok(Content {
            config: self.load_config()?,
            species: self.load_species()?,
            quests: self.load_quests()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

//! Quest area loader.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use vpet_core::{QuestArea, QuestBook};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Deserialize)]
struct QuestCatalog {
    areas: Vec<QuestArea>,
}

/// Loader for quest areas from RON files.
pub struct QuestLoader;

impl QuestLoader {
    /// Load the quest book from a RON file. Area order is unlock order.
    pub fn load(path: &Path) -> LoadResult<QuestBook> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<QuestBook> {
        let catalog: QuestCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse quests RON: {}", e))?;

        let mut seen = HashSet::new();
        for area in &catalog.areas {
            if !seen.insert(area.id.as_str()) {
                anyhow::bail!("Duplicate quest area id: {}", area.id);
            }
            if area.enemies.is_empty() {
                anyhow::bail!("Quest area {} has no enemies", area.id);
            }
        }

        Ok(QuestBook::new(catalog.areas))
    }
}

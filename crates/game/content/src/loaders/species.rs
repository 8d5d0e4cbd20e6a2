//! Species catalog loader.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use vpet_core::{Requirement, SpeciesDef, SpeciesTable};

use crate::loaders::{LoadResult, read_file};

/// Species catalog structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct SpeciesCatalog {
    species: Vec<SpeciesDef>,
}

/// Loader for the species table from RON files.
pub struct SpeciesLoader;

impl SpeciesLoader {
    /// Load the species table from a RON file.
    ///
    /// Fails on duplicate ids, on rules whose condition group list is empty,
    /// and on evolution targets or jogress partners that the catalog does not
    /// define.
    pub fn load(path: &Path) -> LoadResult<SpeciesTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpeciesTable> {
        let catalog: SpeciesCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species RON: {}", e))?;

        let mut seen = HashSet::new();
        for def in &catalog.species {
            if !seen.insert(def.id.clone()) {
                anyhow::bail!("Duplicate species id: {}", def.id);
            }
            for rule in &def.evolutions {
                let no_groups = matches!(
                    &rule.requirement,
                    Requirement::ConditionGroups(groups) if groups.is_empty()
                );
                if no_groups {
                    anyhow::bail!(
                        "Species {} lists no condition groups for {}",
                        def.id,
                        rule.target
                    );
                }
            }
        }

        let table: SpeciesTable = catalog.species.into_iter().collect();

        let dangling = table.dangling_references();
        if !dangling.is_empty() {
            let listed = dangling
                .iter()
                .map(|(owner, missing)| format!("{owner} -> {missing}"))
                .collect::<Vec<_>>()
                .join(", ");
            anyhow::bail!("Species catalog references unknown species: {}", listed);
        }

        Ok(table)
    }
}

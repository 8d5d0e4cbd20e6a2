//! Content loaders for reading pet data from files.
//!
//! This module provides loaders that convert RON/TOML files into the
//! `vpet-core` types the engine reads.

pub mod config;
pub mod factory;
pub mod quests;
pub mod species;

pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use quests::QuestLoader;
pub use species::SpeciesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

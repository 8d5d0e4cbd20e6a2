//! Data-driven content definitions and loaders.
//!
//! This crate houses the static pet content and provides loaders for RON/TOML data files:
//! - Species catalog with evolution rules (data-driven via RON)
//! - Quest areas (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime and never appears in a creature record.
//! The bundled Ver.1 data lives in this crate's `data/` directory.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, Content, ContentFactory, LoadResult, QuestLoader, SpeciesLoader};

/// Directory holding the bundled data files, resolved at compile time.
pub const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

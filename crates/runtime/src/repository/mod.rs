//! Repository layer for creature records.
//!
//! Repositories handle data that CHANGES while a creature lives. Static
//! content (species, quests, engine config) comes from `vpet-content`.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileCreatureRepository;
pub use memory::InMemoryCreatureRepo;
pub use traits::CreatureRepository;
pub use types::{CreatureId, CreatureRecord, InvalidCreatureId};

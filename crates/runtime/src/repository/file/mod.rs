//! File-based repository implementations.

mod creature;

pub use creature::FileCreatureRepository;

//! In-memory repository implementations for tests and local runs.

mod creature;

pub use creature::InMemoryCreatureRepo;

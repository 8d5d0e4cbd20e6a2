//! Host-side orchestration for the virtual-creature engine.
//!
//! `vpet-core` is pure: it never reads a clock or touches storage. This crate
//! supplies those ports and wraps them in [`CreatureService`], which enforces
//! one writer per creature.
//!
//! Modules are organized by responsibility:
//! - [`service`] hosts the per-creature single-writer service
//! - [`api`] exposes the error types downstream clients interact with
//! - [`repository`] persists creature records (in memory or as JSON files)
//! - [`clock`] and [`config`] provide time and environment configuration
pub mod api;
pub mod clock;
pub mod config;
pub mod repository;
pub mod service;

pub use api::{Result, RuntimeError};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{RuntimeConfig, SleepSchedule};
pub use repository::{
    CreatureId, CreatureRecord, CreatureRepository, FileCreatureRepository, InMemoryCreatureRepo,
    InvalidCreatureId, RepositoryError,
};
pub use service::{BattleReport, CreatureService, CreatureStatus};

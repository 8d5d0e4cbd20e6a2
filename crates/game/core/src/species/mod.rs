//! Species table: static per-species constants and evolution rules.
//!
//! The engine only ever reads the table through [`SpeciesOracle`]; loading and
//! caching are host concerns.

mod def;
mod rules;

use std::collections::BTreeMap;

pub use def::{Attribute, EvolutionCriteria, SpeciesDef, SpeciesId, Stage};
pub use rules::{ConditionField, ConditionGroup, EvolutionRule, Requirement, StatRange};

use crate::error::CoreError;

/// Read-only access to species definitions.
pub trait SpeciesOracle {
    fn species(&self, id: &SpeciesId) -> Option<&SpeciesDef>;

    /// Looks up `id`, failing with [`CoreError::UnknownSpecies`].
    fn require(&self, id: &SpeciesId) -> Result<&SpeciesDef, CoreError> {
        self.species(id)
            .ok_or_else(|| CoreError::UnknownSpecies(id.clone()))
    }
}

/// In-memory species table keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeciesTable {
    entries: BTreeMap<SpeciesId, SpeciesDef>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, returning the one it replaced.
    pub fn insert(&mut self, def: SpeciesDef) -> Option<SpeciesDef> {
        self.entries.insert(def.id.clone(), def)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesDef> {
        self.entries.values()
    }

    /// Evolution targets and jogress partners that are not in the table,
    /// as `(owner, missing)` pairs.
    pub fn dangling_references(&self) -> Vec<(SpeciesId, SpeciesId)> {
        let mut missing = Vec::new();
        for def in self.entries.values() {
            for rule in &def.evolutions {
                if !self.entries.contains_key(&rule.target) {
                    missing.push((def.id.clone(), rule.target.clone()));
                }
                if let Requirement::Jogress { partner } = &rule.requirement
                    && !self.entries.contains_key(partner)
                {
                    missing.push((def.id.clone(), partner.clone()));
                }
            }
        }
        missing
    }
}

impl FromIterator<SpeciesDef> for SpeciesTable {
    fn from_iter<I: IntoIterator<Item = SpeciesDef>>(iter: I) -> Self {
        let mut table = Self::new();
        for def in iter {
            table.insert(def);
        }
        table
    }
}

impl SpeciesOracle for SpeciesTable {
    fn species(&self, id: &SpeciesId) -> Option<&SpeciesDef> {
        self.entries.get(id)
    }
}

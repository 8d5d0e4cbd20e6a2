//! Records persisted by repositories.

mod record;

pub use record::{CreatureId, CreatureRecord, InvalidCreatureId};

//! Persistence layer: a flat key/value record store plus a change
//! notification bus.
//!
//! Every piece of composer state is one independent record addressed by a
//! deterministic string key (see [`keys`]). There is no transactionality and
//! none is needed: the only cross-record relationship (the "same as previous
//! day" link) is read-only from the dependent side. Callers are expected to
//! treat read failures as absent records and to drop write failures silently;
//! the store must never take the editor down.

mod bus;
mod keys;
mod memory;
mod sqlite;

use anyhow::Result;

pub use bus::KeyBus;
pub use keys::{
    summary_key, title_key, verse_key, KEY_DAYS_TO_SHOW, KEY_START_ON_SUNDAY, KEY_SUNDAY_DATE,
};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// The record store contract. Implementations hold one value per key; each
/// key is an independent record. The trait is deliberately object-safe so the
/// app can hold a `Box<dyn RecordStore>` and tests can swap in [`MemoryStore`].
pub trait RecordStore {
    /// Fetch the value stored under `key`, or `None` when no record exists.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

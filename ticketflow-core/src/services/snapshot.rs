//! Snapshot store - whole-collection persistence in one storage slot
//!
//! Every write serializes the full collection and overwrites the slot.
//! Reads never partially succeed: either the whole snapshot parses or the
//! store falls back to its seed.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::result::Result;
use crate::ports::KeyValueStorage;

/// What a slot holds before it has ever been written
pub enum Seed<T> {
    /// Start from an empty collection and write nothing
    Empty,
    /// Start from sample records and persist them on first load
    Sample(fn(DateTime<Utc>) -> Vec<T>),
}

/// Typed view over one slot holding a JSON array of `T`
pub struct SnapshotStore<T> {
    storage: Arc<dyn KeyValueStorage>,
    slot: &'static str,
    seed: Seed<T>,
    _record: PhantomData<fn() -> T>,
}

impl<T> SnapshotStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(storage: Arc<dyn KeyValueStorage>, slot: &'static str, seed: Seed<T>) -> Self {
        Self {
            storage,
            slot,
            seed,
            _record: PhantomData,
        }
    }

    pub fn slot(&self) -> &'static str {
        self.slot
    }

    /// Current collection, or the seed on first run
    ///
    /// A slot that fails to parse is reported and treated like a missing
    /// one, except that the seed is not written back: the bad value stays
    /// until the next successful [`save`](Self::save).
    pub fn load(&self) -> Result<Vec<T>> {
        let Some(raw) = self.storage.get(self.slot)? else {
            let seeded = self.seed_records();
            if !seeded.is_empty() {
                self.save(&seeded)?;
            }
            return Ok(seeded);
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                eprintln!(
                    "[ticketflow] Ignoring malformed '{}' snapshot ({}); using defaults",
                    self.slot, e
                );
                Ok(self.seed_records())
            }
        }
    }

    /// Replace the persisted collection with `records`
    pub fn save(&self, records: &[T]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.storage.set(self.slot, &raw)
    }

    /// Drop the slot entirely; the next load starts from the seed again
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(self.slot)
    }

    fn seed_records(&self) -> Vec<T> {
        match &self.seed {
            Seed::Empty => Vec::new(),
            Seed::Sample(sample) => sample(Utc::now()),
        }
    }
}

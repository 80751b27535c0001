//! Persistence port adapters.
//!
//! Both adapters keep items in insertion order and share the same upsert and
//! delete rules, so the service behaves identically against either one.

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryItemStore;
pub use json_file::JsonFileItemStore;

use chrono::{DateTime, Utc};

use itemtrack_core::{Entity, ItemId};
use itemtrack_inventory::{Item, PersistenceError};

/// Insert or replace `item`, stamping timestamps. Returns the stored value.
///
/// `created_at` is kept from the stored copy when the id already exists.
pub(crate) fn upsert(items: &mut Vec<Item>, item: Item, now: DateTime<Utc>) -> Item {
    match items.iter().position(|existing| existing.id() == item.id()) {
        Some(idx) => {
            let created_at = items[idx].created_at().unwrap_or(now);
            let stored = item.with_timestamps(created_at, now);
            items[idx] = stored.clone();
            stored
        }
        None => {
            let stored = item.with_timestamps(now, now);
            items.push(stored.clone());
            stored
        }
    }
}

/// Remove the item with `id`, preserving the order of the rest.
pub(crate) fn remove(items: &mut Vec<Item>, id: ItemId) -> Result<(), PersistenceError> {
    let idx = items
        .iter()
        .position(|existing| existing.id_typed() == id)
        .ok_or(PersistenceError::NotFound(id))?;
    items.remove(idx);
    Ok(())
}

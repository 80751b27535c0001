//! Persistence port: the storage collaborator the inventory service writes through.

use std::sync::Arc;

use thiserror::Error;

use itemtrack_core::ItemId;
use itemtrack_events::Subscription;

use crate::item::Item;

/// Failure reported by a persistence adapter.
///
/// These are infrastructure errors (storage, connectivity) as opposed to
/// validation errors. The service passes them through untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("item not found: {0}")]
    NotFound(ItemId),

    #[error("storage backend failure: {0}")]
    Backend(String),

    #[error("storage lock poisoned")]
    Poisoned,
}

impl PersistenceError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Full view of every item at one point in time.
///
/// A snapshot replaces whatever view came before it; snapshots are never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    items: Vec<Item>,
    is_synced: bool,
}

impl Snapshot {
    pub fn new(items: Vec<Item>, is_synced: bool) -> Self {
        Self { items, is_synced }
    }

    /// Items in the order the store delivered them.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Whether the store considers this view fully synchronized with its backend.
    pub fn is_synced(&self) -> bool {
        self.is_synced
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Storage, querying and change notification for items.
///
/// ## Contract
///
/// - `save` is an upsert keyed by item id. It stamps `created_at` the first
///   time an id is seen and `updated_at` on every call, and returns the stored
///   value.
/// - `delete` removes an item and fails with [`PersistenceError::NotFound`] when
///   the id is unknown.
/// - `observe` yields the current content immediately, then a fresh
///   [`Snapshot`] after every change.
/// - Each `save`/`delete` is atomic. Retries, timeouts and cancellation are the
///   adapter's business.
pub trait PersistencePort: Send + Sync {
    fn list(&self) -> Result<Vec<Item>, PersistenceError>;

    fn save(&self, item: Item) -> Result<Item, PersistenceError>;

    fn delete(&self, id: ItemId) -> Result<(), PersistenceError>;

    fn observe(&self) -> Subscription<Snapshot>;
}

impl<P> PersistencePort for Arc<P>
where
    P: PersistencePort + ?Sized,
{
    fn list(&self) -> Result<Vec<Item>, PersistenceError> {
        (**self).list()
    }

    fn save(&self, item: Item) -> Result<Item, PersistenceError> {
        (**self).save(item)
    }

    fn delete(&self, id: ItemId) -> Result<(), PersistenceError> {
        (**self).delete(id)
    }

    fn observe(&self) -> Subscription<Snapshot> {
        (**self).observe()
    }
}

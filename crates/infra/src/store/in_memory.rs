use std::sync::RwLock;

use tracing::{debug, warn};

use itemtrack_core::ItemId;
use itemtrack_events::{EventBus, InMemoryEventBus, Subscription};
use itemtrack_inventory::{Item, PersistenceError, PersistencePort, Snapshot, timestamp};

use super::{remove, upsert};

/// In-memory item store.
///
/// Intended for tests/dev. Every successful write publishes a full
/// [`Snapshot`] while the write lock is still held, so observers see changes
/// in commit order.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<Vec<Item>>,
    bus: InMemoryEventBus<Snapshot>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing items, kept as given (timestamps included).
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
            bus: InMemoryEventBus::new(),
        }
    }

    fn publish(&self, items: &[Item]) {
        debug!(count = items.len(), "publishing snapshot");
        if let Err(e) = self.bus.publish(Snapshot::new(items.to_vec(), true)) {
            warn!("snapshot publication failed: {e}");
        }
    }
}

impl PersistencePort for InMemoryItemStore {
    fn list(&self) -> Result<Vec<Item>, PersistenceError> {
        let items = self.items.read().map_err(|_| PersistenceError::Poisoned)?;
        Ok(items.clone())
    }

    fn save(&self, item: Item) -> Result<Item, PersistenceError> {
        let mut items = self.items.write().map_err(|_| PersistenceError::Poisoned)?;
        let stored = upsert(&mut items, item, timestamp::now());
        self.publish(&items);
        Ok(stored)
    }

    fn delete(&self, id: ItemId) -> Result<(), PersistenceError> {
        let mut items = self.items.write().map_err(|_| PersistenceError::Poisoned)?;
        remove(&mut items, id)?;
        self.publish(&items);
        Ok(())
    }

    fn observe(&self) -> Subscription<Snapshot> {
        match self.items.read() {
            Ok(items) => self.bus.subscribe_seeded(Snapshot::new(items.clone(), true)),
            Err(_) => {
                warn!("item store lock poisoned; observer starts from an empty, unsynced view");
                self.bus.subscribe_seeded(Snapshot::new(Vec::new(), false))
            }
        }
    }
}

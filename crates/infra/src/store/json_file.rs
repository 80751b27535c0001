//! Item store backed by a single JSON file.
//!
//! The whole item list is loaded once at open and rewritten after each
//! successful write (temp file + rename). A write that fails to reach disk
//! leaves both the file and the in-memory view untouched.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, info, warn};

use itemtrack_core::ItemId;
use itemtrack_events::{EventBus, InMemoryEventBus, Subscription};
use itemtrack_inventory::{Item, PersistenceError, PersistencePort, Snapshot, timestamp};

use super::{remove, upsert};

#[derive(Debug)]
pub struct JsonFileItemStore {
    path: PathBuf,
    items: RwLock<Vec<Item>>,
    bus: InMemoryEventBus<Snapshot>,
}

fn read_items(path: &Path) -> Result<Vec<Item>, PersistenceError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(PersistenceError::backend(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw).map_err(|e| {
        PersistenceError::backend(format!("failed to decode {}: {e}", path.display()))
    })
}

fn write_items(path: &Path, items: &[Item]) -> Result<(), PersistenceError> {
    let encoded = serde_json::to_string_pretty(items)
        .map_err(|e| PersistenceError::backend(format!("failed to encode items: {e}")))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, encoded)
        .and_then(|()| fs::rename(&tmp, path))
        .map_err(|e| PersistenceError::backend(format!("failed to write {}: {e}", path.display())))
}

impl JsonFileItemStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing or empty file is an empty store; the file is created on the
    /// first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let items = read_items(&path)?;
        info!(path = %path.display(), count = items.len(), "item store opened");
        Ok(Self {
            path,
            items: RwLock::new(items),
            bus: InMemoryEventBus::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stage a change on a copy, write it to disk, then commit and publish.
    fn commit<T>(
        &self,
        change: impl FnOnce(&mut Vec<Item>) -> Result<T, PersistenceError>,
    ) -> Result<T, PersistenceError> {
        let mut items = self.items.write().map_err(|_| PersistenceError::Poisoned)?;
        let mut staged = items.clone();
        let out = change(&mut staged)?;
        write_items(&self.path, &staged)?;
        *items = staged;

        debug!(count = items.len(), "publishing snapshot");
        if let Err(e) = self.bus.publish(Snapshot::new(items.clone(), true)) {
            warn!("snapshot publication failed: {e}");
        }
        Ok(out)
    }
}

impl PersistencePort for JsonFileItemStore {
    fn list(&self) -> Result<Vec<Item>, PersistenceError> {
        let items = self.items.read().map_err(|_| PersistenceError::Poisoned)?;
        Ok(items.clone())
    }

    fn save(&self, item: Item) -> Result<Item, PersistenceError> {
        self.commit(|items| Ok(upsert(items, item, timestamp::now())))
    }

    fn delete(&self, id: ItemId) -> Result<(), PersistenceError> {
        self.commit(|items| remove(items, id))
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

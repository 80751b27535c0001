//! Live view over a persistence port's snapshot stream.

use std::time::Duration;

use itemtrack_events::Subscription;

use crate::item::Item;
use crate::port::Snapshot;

/// Sequence of item-list snapshots, as delivered by the store.
///
/// Iterating blocks until the store publishes the next snapshot and ends when
/// the store goes away. The feed remembers the last snapshot it handed out;
/// every new one replaces it wholesale.
///
/// A feed is cheap: to start over, ask the service for a new one.
#[derive(Debug)]
pub struct ItemFeed {
    subscription: Subscription<Snapshot>,
    current: Option<Snapshot>,
}

impl ItemFeed {
    pub fn new(subscription: Subscription<Snapshot>) -> Self {
        Self {
            subscription,
            current: None,
        }
    }

    /// Latest snapshot seen, if any.
    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    /// Items of the latest snapshot (empty before the first one arrives).
    pub fn items(&self) -> &[Item] {
        self.current.as_ref().map(Snapshot::items).unwrap_or(&[])
    }

    /// Catch up without blocking: skip to the newest pending snapshot.
    pub fn refresh(&mut self) -> Option<&Snapshot> {
        if let Some(newest) = self.subscription.latest() {
            self.current = Some(newest);
        }
        self.current.as_ref()
    }

    /// Wait up to `timeout` for the next snapshot.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<&Snapshot> {
        let snapshot = self.subscription.recv_timeout(timeout).ok()?;
        self.current = Some(snapshot);
        self.current.as_ref()
    }
}

impl Iterator for ItemFeed {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        let snapshot = self.subscription.recv().ok()?;
        self.current = Some(snapshot.clone());
        Some(snapshot)
    }
}

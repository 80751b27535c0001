//! Integration tests for the inventory service against real adapters.
//!
//! Tests: Service → PersistencePort → Snapshot feed
//!
//! Verifies:
//! - Validation failures never reach the port
//! - Port calls happen exactly once per successful operation
//! - Port errors come back unchanged
//! - Observers always see whole snapshots, newest replacing older

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::{TimeZone, Utc};

    use itemtrack_core::{Entity, ItemId, ValidationError};
    use itemtrack_events::Subscription;
    use itemtrack_inventory::{
        Followup, InventoryService, Item, PersistenceError, PersistencePort, ServiceError,
        Snapshot, export_report,
    };

    use crate::store::{InMemoryItemStore, JsonFileItemStore};

    /// Port wrapper that counts writes.
    #[derive(Debug, Default)]
    struct CountingPort<P> {
        inner: P,
        saves: AtomicUsize,
        deletes: AtomicUsize,
    }

    impl<P> CountingPort<P> {
        fn saves(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }

        fn deletes(&self) -> usize {
            self.deletes.load(Ordering::SeqCst)
        }
    }

    impl<P: PersistencePort> PersistencePort for CountingPort<P> {
        fn list(&self) -> Result<Vec<Item>, PersistenceError> {
            self.inner.list()
        }

        fn save(&self, item: Item) -> Result<Item, PersistenceError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save(item)
        }

        fn delete(&self, id: ItemId) -> Result<(), PersistenceError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete(id)
        }

        fn observe(&self) -> Subscription<Snapshot> {
            self.inner.observe()
        }
    }

    /// Port whose backend is always down.
    #[derive(Debug, Default)]
    struct OfflinePort {
        store: InMemoryItemStore,
    }

    impl PersistencePort for OfflinePort {
        fn list(&self) -> Result<Vec<Item>, PersistenceError> {
            Err(PersistenceError::backend("offline"))
        }

        fn save(&self, _item: Item) -> Result<Item, PersistenceError> {
            Err(PersistenceError::backend("offline"))
        }

        fn delete(&self, _id: ItemId) -> Result<(), PersistenceError> {
            Err(PersistenceError::backend("offline"))
        }

        fn observe(&self) -> Subscription<Snapshot> {
            self.store.observe()
        }
    }

    type Port = Arc<CountingPort<InMemoryItemStore>>;

    fn setup() -> (InventoryService<Port>, Port) {
        let port: Port = Arc::new(CountingPort::default());
        (InventoryService::new(port.clone()), port)
    }

    fn validation(err: ServiceError) -> ValidationError {
        match err {
            ServiceError::Validation(e) => e,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_persists_item_with_store_timestamps() {
        let (service, port) = setup();

        let item = service.create_item("Drill", Some("cordless")).unwrap();
        assert_eq!(item.name(), "Drill");
        assert_eq!(item.description(), Some("cordless"));
        assert!(item.record().is_empty());
        assert!(item.followup().is_none());
        assert!(item.created_at().is_some());
        assert_eq!(item.created_at(), item.updated_at());

        assert_eq!(port.saves(), 1);
        assert_eq!(port.list().unwrap(), vec![item]);
    }

    #[test]
    fn blank_names_never_reach_the_port() {
        let (service, port) = setup();
        let current = service.create_item("Drill", None).unwrap();

        for name in ["", " ", "\t\n  "] {
            let err = service.create_item(name, None).unwrap_err();
            assert_eq!(validation(err).code(), "empty-name");

            let err = service.update_item(Some(&current), name, None).unwrap_err();
            assert_eq!(validation(err).code(), "empty-name");
        }

        assert_eq!(port.saves(), 1);
        assert_eq!(port.list().unwrap(), vec![current]);
    }

    #[test]
    fn operations_without_selection_are_rejected() {
        let (service, port) = setup();

        let errors = vec![
            service.update_item(None, "Drill", None).unwrap_err(),
            service.delete_item(None).unwrap_err(),
            service.record_followup(None, &Followup::default()).unwrap_err(),
            service.lend_item(None, "s1", "Ann").unwrap_err(),
            service.return_item(None).unwrap_err(),
        ];
        for err in errors {
            assert_eq!(validation(err), ValidationError::NoSelection);
        }

        assert_eq!(port.saves(), 0);
        assert_eq!(port.deletes(), 0);
    }

    #[test]
    fn no_selection_is_checked_before_name() {
        let (service, _port) = setup();
        let err = service.update_item(None, "  ", None).unwrap_err();
        assert_eq!(validation(err), ValidationError::NoSelection);
    }

    #[test]
    fn unchanged_update_only_moves_updated_at() {
        let (service, port) = setup();
        let current = service.create_item("Drill", Some("cordless")).unwrap();

        let saved = service
            .update_item(Some(&current), current.name(), current.description())
            .unwrap();

        assert_eq!(port.saves(), 2);
        assert!(saved.updated_at() >= current.updated_at());
        let normalized = saved.with_timestamps(
            current.created_at().unwrap(),
            current.updated_at().unwrap(),
        );
        assert_eq!(normalized, current);
    }

    #[test]
    fn update_preserves_history_and_followup() {
        let (service, _port) = setup();
        let item = service.create_item("Drill", None).unwrap();
        let item = service.lend_item(Some(&item), "s1", "Ann").unwrap();
        let item = service
            .record_followup(
                Some(&item),
                &Followup {
                    asset_no: Some("A1".to_string()),
                    ..Followup::default()
                },
            )
            .unwrap();

        let renamed = service.update_item(Some(&item), "Hammer drill", None).unwrap();
        assert_eq!(renamed.id(), item.id());
        assert_eq!(renamed.record(), item.record());
        assert_eq!(renamed.followup(), item.followup());
        assert_eq!(renamed.description(), None);
    }

    #[test]
    fn borrowed_item_cannot_be_deleted() {
        let (service, port) = setup();
        let item = service.create_item("Drill", None).unwrap();
        let lent = service.lend_item(Some(&item), "s1", "Ann").unwrap();

        let err = service.delete_item(Some(&lent)).unwrap_err();
        assert_eq!(validation(err).code(), "item-borrowed");
        assert_eq!(port.deletes(), 0);
        assert_eq!(port.list().unwrap().len(), 1);
    }

    #[test]
    fn returned_item_is_deleted_exactly_once() {
        let (service, port) = setup();
        let returned_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let borrowed_at = Utc.with_ymd_and_hms(2023, 12, 24, 9, 0, 0).unwrap();
        let item = Item::new("Drill", None)
            .unwrap()
            .lend("s1", "Ann", borrowed_at)
            .unwrap()
            .return_loan(returned_at)
            .unwrap();
        let stored = port.save(item).unwrap();
        assert_eq!(stored.record()[0].returned_at(), Some(returned_at));

        service.delete_item(Some(&stored)).unwrap();
        assert_eq!(port.deletes(), 1);
        assert!(port.list().unwrap().is_empty());
    }

    #[test]
    fn followup_merge_is_by_presence() {
        let (service, port) = setup();
        let item = service.create_item("Drill", None).unwrap();

        let first = service
            .record_followup(
                Some(&item),
                &Followup {
                    asset_no: Some("A1".to_string()),
                    asset_cost: Some(250.0),
                    ..Followup::default()
                },
            )
            .unwrap();
        let second = service
            .record_followup(
                Some(&first),
                &Followup {
                    asset_no: Some(String::new()),
                    asset_cost: Some(0.0),
                    remarks: Some("ok".to_string()),
                    ..Followup::default()
                },
            )
            .unwrap();

        let followup = second.followup().unwrap();
        assert_eq!(followup.asset_no.as_deref(), Some("A1"));
        assert_eq!(followup.asset_cost, Some(250.0));
        assert_eq!(followup.remarks.as_deref(), Some("ok"));
        assert_eq!(port.list().unwrap(), vec![second]);
    }

    #[test]
    fn lend_and_return_cycle() {
        let (service, _port) = setup();
        let item = service.create_item("Drill", None).unwrap();

        let err = service.lend_item(Some(&item), " ", "Ann").unwrap_err();
        assert_eq!(validation(err).code(), "empty-borrower");
        let err = service.return_item(Some(&item)).unwrap_err();
        assert_eq!(validation(err).code(), "not-borrowed");

        let lent = service.lend_item(Some(&item), "s1", "Ann").unwrap();
        assert!(lent.is_borrowed());
        let err = service.lend_item(Some(&lent), "s2", "Bob").unwrap_err();
        assert_eq!(validation(err).code(), "item-borrowed");

        let back = service.return_item(Some(&lent)).unwrap();
        assert!(!back.is_borrowed());
        let again = service.lend_item(Some(&back), "s2", "Bob").unwrap();
        assert_eq!(again.record().len(), 2);
        assert_eq!(again.record()[0], back.record()[0]);
        assert!(again.record()[0].returned_at().is_some());
    }

    #[test]
    fn persistence_errors_pass_through() {
        let service = InventoryService::new(OfflinePort::default());

        let err = service.create_item("Drill", None).unwrap_err();
        assert_eq!(err, ServiceError::Persistence(PersistenceError::backend("offline")));

        let item = Item::new("Drill", None).unwrap();
        let err = service.delete_item(Some(&item)).unwrap_err();
        assert!(err.as_validation().is_none());
    }

    #[test]
    fn deleting_an_unknown_item_reports_not_found() {
        let (service, _port) = setup();
        let ghost = Item::new("Ghost", None).unwrap();
        let err = service.delete_item(Some(&ghost)).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Persistence(PersistenceError::NotFound(ghost.id_typed()))
        );
    }

    #[test]
    fn feed_sees_whole_snapshots_in_order() {
        let (service, _port) = setup();
        let mut feed = service.list_items();

        let initial = feed.next().unwrap();
        assert!(initial.is_empty());

        let a = service.create_item("A", None).unwrap();
        let b = service.create_item("B", None).unwrap();

        let s1 = feed.next().unwrap();
        assert_eq!(s1.items(), &[a.clone()]);
        let s2 = feed.next().unwrap();
        assert_eq!(s2.items(), &[a, b]);
        assert_eq!(feed.current(), Some(&s2));
    }

    #[test]
    fn refresh_skips_to_newest_snapshot() {
        let (service, _port) = setup();
        let mut feed = service.list_items();

        let a = service.create_item("A", None).unwrap();
        let b = service.create_item("B", None).unwrap();
        service.delete_item(Some(&a)).unwrap();

        let current = feed.refresh().unwrap();
        assert_eq!(current.items(), &[b]);
        assert!(current.is_synced());
    }

    #[test]
    fn list_items_is_restartable() {
        let (service, _port) = setup();
        let a = service.create_item("A", None).unwrap();

        let first = service.list_items();
        drop(first);

        let mut second = service.list_items();
        let snapshot = second.next_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(snapshot.items(), &[a]);
    }

    #[test]
    fn feed_updates_across_threads() {
        let (service, _port) = setup();
        let service = Arc::new(service);
        let mut feed = service.list_items();
        let _ = feed.next();

        let writer = {
            let service = service.clone();
            std::thread::spawn(move || {
                for n in 0..5 {
                    service.create_item(&format!("item-{n}"), None).unwrap();
                }
            })
        };
        writer.join().unwrap();

        let mut last = None;
        while let Some(snapshot) = feed.next_timeout(Duration::from_millis(100)) {
            last = Some(snapshot.len());
        }
        assert_eq!(last, Some(5));
    }

    #[test]
    fn json_store_round_trips_through_the_service() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");

        let id = {
            let service = InventoryService::new(JsonFileItemStore::open(&path).unwrap());
            let item = service.create_item("Microscope", Some("lab 2")).unwrap();
            let item = service.lend_item(Some(&item), "s42", "Dana").unwrap();
            service.return_item(Some(&item)).unwrap().id_typed()
        };

        let service = InventoryService::new(JsonFileItemStore::open(&path).unwrap());
        let items = service.port().list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id_typed(), id);
        assert_eq!(items[0].record().len(), 1);
        assert!(!items[0].is_borrowed());

        service.delete_item(items.first()).unwrap();
        assert!(service.port().list().unwrap().is_empty());
    }

    #[test]
    fn report_reflects_persisted_item() {
        let (service, _port) = setup();
        let item = service.create_item("Drill", None).unwrap();
        let item = service
            .record_followup(
                Some(&item),
                &Followup {
                    asset_no: Some("A1".to_string()),
                    ..Followup::default()
                },
            )
            .unwrap();

        let report = export_report(&item).unwrap();
        let mut lines = report.content.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();
        assert!(header.split(',').any(|h| h == "followup.assetNo"));
        assert!(header.split(',').any(|h| h == "createdAt"));
        assert!(row.contains("Drill"));
        assert!(row.contains("A1"));
        assert!(row.contains(&item.id().to_string()));
    }
}

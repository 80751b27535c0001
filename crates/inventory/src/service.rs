//! Inventory domain service.
//!
//! Validates every lifecycle transition up front, then hands the resulting
//! item to the persistence port in a single call. Nothing is written when
//! validation fails, and port errors come back to the caller unchanged.
//!
//! The currently selected item belongs to the caller and is passed in as
//! `Option<&Item>`; `None` means nothing is selected.

use tracing::{info, warn};

use itemtrack_core::{Entity, ValidationError, ValidationResult};

use crate::error::ServiceResult;
use crate::feed::ItemFeed;
use crate::followup::Followup;
use crate::item::Item;
use crate::port::PersistencePort;
use crate::timestamp;

#[derive(Debug)]
pub struct InventoryService<P> {
    port: P,
}

fn selected(current: Option<&Item>) -> ValidationResult<&Item> {
    current.ok_or(ValidationError::NoSelection)
}

fn rejected<T>(op: &'static str, result: ValidationResult<T>) -> ValidationResult<T> {
    if let Err(e) = &result {
        warn!(op, code = e.code(), "operation rejected");
    }
    result
}

impl<P> InventoryService<P>
where
    P: PersistencePort,
{
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Create and persist a new item with empty history.
    pub fn create_item(&self, name: &str, description: Option<&str>) -> ServiceResult<Item> {
        let item = rejected("create", Item::new(name, description.map(str::to_string)))?;
        let saved = self.port.save(item)?;
        info!(item_id = %saved.id(), "item created");
        Ok(saved)
    }

    /// Replace name and description of the selected item.
    pub fn update_item(
        &self,
        current: Option<&Item>,
        name: &str,
        description: Option<&str>,
    ) -> ServiceResult<Item> {
        let next = rejected(
            "update",
            selected(current)
                .and_then(|item| item.with_details(name, description.map(str::to_string))),
        )?;
        let saved = self.port.save(next)?;
        info!(item_id = %saved.id(), "item updated");
        Ok(saved)
    }

    /// Delete the selected item; refused while it is out on loan.
    pub fn delete_item(&self, current: Option<&Item>) -> ServiceResult<()> {
        let item = rejected(
            "delete",
            selected(current).and_then(|item| item.ensure_deletable().map(|()| item)),
        )?;
        self.port.delete(item.id_typed())?;
        info!(item_id = %item.id(), "item deleted");
        Ok(())
    }

    /// Merge `fields` into the selected item's followup and persist.
    ///
    /// Only fields carrying a non-empty value are taken; see [`Followup::merged`].
    pub fn record_followup(&self, current: Option<&Item>, fields: &Followup) -> ServiceResult<Item> {
        let next = rejected("followup", selected(current).map(|item| item.with_followup(fields)))?;
        let saved = self.port.save(next)?;
        info!(item_id = %saved.id(), "followup recorded");
        Ok(saved)
    }

    /// Lend the selected item to a borrower, opening a new borrow record.
    pub fn lend_item(
        &self,
        current: Option<&Item>,
        user_id: &str,
        username: &str,
    ) -> ServiceResult<Item> {
        let next = rejected(
            "lend",
            selected(current).and_then(|item| item.lend(user_id, username, timestamp::now())),
        )?;
        let saved = self.port.save(next)?;
        info!(item_id = %saved.id(), user_id, "item lent");
        Ok(saved)
    }

    /// Close the open borrow record of the selected item.
    pub fn return_item(&self, current: Option<&Item>) -> ServiceResult<Item> {
        let next = rejected(
            "return",
            selected(current).and_then(|item| item.return_loan(timestamp::now())),
        )?;
        let saved = self.port.save(next)?;
        info!(item_id = %saved.id(), "item returned");
        Ok(saved)
    }

    /// Subscribe to the store's snapshots.
    ///
    /// Each call starts an independent feed, beginning with the store's
    /// current content.
    pub fn list_items(&self) -> ItemFeed {
        ItemFeed::new(self.port.observe())
    }
}

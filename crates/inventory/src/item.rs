use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use itemtrack_core::{Entity, ItemId, ValidationError, ValidationResult};

use crate::followup::Followup;
use crate::record::BorrowRecord;
use crate::timestamp::{self, is_blank};

/// Entity: an inventory item with its borrow history and optional followup.
///
/// Items are values. Every change returns a new `Item`; nothing here mutates
/// an existing one, and nothing here touches persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    name: String,
    description: Option<String>,
    #[serde(default, deserialize_with = "record_list")]
    record: Vec<BorrowRecord>,
    #[serde(default)]
    followup: Option<Followup>,
    #[serde(default, serialize_with = "timestamp::serialize_opt")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, serialize_with = "timestamp::serialize_opt")]
    updated_at: Option<DateTime<Utc>>,
}

/// Accepts the list form, `null`, or the older single-record form.
/// `null` entries inside a list are dropped.
fn record_list<'de, D>(deserializer: D) -> Result<Vec<BorrowRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Many(Vec<Option<BorrowRecord>>),
        One(BorrowRecord),
    }

    Ok(match Option::<Stored>::deserialize(deserializer)? {
        Some(Stored::Many(records)) => records.into_iter().flatten().collect(),
        Some(Stored::One(record)) => vec![record],
        None => Vec::new(),
    })
}

fn ensure_name(name: &str) -> ValidationResult<()> {
    if is_blank(name) {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

impl Item {
    /// Build a new, not-yet-persisted item with empty history and no followup.
    ///
    /// The name is stored as given; only its trimmed form has to be non-empty.
    pub fn new(name: impl Into<String>, description: Option<String>) -> ValidationResult<Self> {
        Self::with_id(ItemId::new(), name, description)
    }

    /// Like [`Item::new`] with a caller-chosen identifier.
    pub fn with_id(
        id: ItemId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> ValidationResult<Self> {
        let name = name.into();
        ensure_name(&name)?;
        Ok(Self {
            id,
            name,
            description,
            record: Vec::new(),
            followup: None,
            created_at: None,
            updated_at: None,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Borrow history, oldest first.
    pub fn record(&self) -> &[BorrowRecord] {
        &self.record
    }

    pub fn followup(&self) -> Option<&Followup> {
        self.followup.as_ref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// The record of the loan currently in progress, if any.
    pub fn open_record(&self) -> Option<&BorrowRecord> {
        self.record.iter().find(|r| r.is_open())
    }

    /// `true` when any borrow record is still open.
    pub fn is_borrowed(&self) -> bool {
        self.open_record().is_some()
    }

    /// Copy with `name`/`description` replaced; everything else is kept.
    pub fn with_details(
        &self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> ValidationResult<Self> {
        let name = name.into();
        ensure_name(&name)?;
        Ok(Self {
            name,
            description,
            ..self.clone()
        })
    }

    /// Copy with `patch` merged into the followup (created empty if absent).
    pub fn with_followup(&self, patch: &Followup) -> Self {
        let merged = self.followup.clone().unwrap_or_default().merged(patch);
        Self {
            followup: Some(merged),
            ..self.clone()
        }
    }

    /// Copy with a new open borrow record appended.
    pub fn lend(
        &self,
        user_id: impl Into<String>,
        username: impl Into<String>,
        at: DateTime<Utc>,
    ) -> ValidationResult<Self> {
        if self.is_borrowed() {
            return Err(ValidationError::ItemBorrowed);
        }
        let opened = BorrowRecord::open(user_id, username, at)?;
        let mut next = self.clone();
        next.record.push(opened);
        Ok(next)
    }

    /// Copy with the open borrow record closed at `at`.
    pub fn return_loan(&self, at: DateTime<Utc>) -> ValidationResult<Self> {
        let idx = self
            .record
            .iter()
            .position(BorrowRecord::is_open)
            .ok_or(ValidationError::NotBorrowed)?;
        let mut next = self.clone();
        let closed = next.record[idx].close(at)?;
        next.record[idx] = closed;
        Ok(next)
    }

    /// Deleting is only allowed when nothing is out on loan.
    pub fn ensure_deletable(&self) -> ValidationResult<()> {
        if self.is_borrowed() {
            return Err(ValidationError::ItemBorrowed);
        }
        Ok(())
    }

    /// Copy carrying store-assigned timestamps.
    ///
    /// Meant for persistence adapters; the domain never sets these itself.
    pub fn with_timestamps(self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            created_at: Some(created_at),
            updated_at: Some(updated_at),
            ..self
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

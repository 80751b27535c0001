use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use itemtrack_core::{ValidationError, ValidationResult, ValueObject};

use crate::timestamp::{self, is_blank, iso};

/// One borrow cycle of an item.
///
/// The borrower and `borrowed_at` are fixed when the record is opened.
/// `returned_at` goes from unset to set exactly once, through [`BorrowRecord::close`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredRecord")]
pub struct BorrowRecord {
    user_id: String,
    username: String,
    #[serde(serialize_with = "timestamp::serialize")]
    borrowed_at: DateTime<Utc>,
    #[serde(serialize_with = "timestamp::serialize_opt")]
    returned_at: Option<DateTime<Utc>>,
}

impl ValueObject for BorrowRecord {}

/// Stored form of a record. Older data names the borrower `studentId` and
/// carries no `username`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    #[serde(alias = "studentId")]
    user_id: Option<String>,
    username: Option<String>,
    borrowed_at: Option<DateTime<Utc>>,
    returned_at: Option<DateTime<Utc>>,
}

impl TryFrom<StoredRecord> for BorrowRecord {
    type Error = String;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        let user_id = stored
            .user_id
            .filter(|v| !is_blank(v))
            .ok_or("borrow record has no borrower id")?;
        let borrowed_at = stored
            .borrowed_at
            .ok_or("borrow record has no borrowedAt")?;
        let username = stored
            .username
            .filter(|v| !is_blank(v))
            .unwrap_or_else(|| user_id.clone());
        Ok(Self {
            user_id,
            username,
            borrowed_at,
            returned_at: stored.returned_at,
        })
    }
}

impl BorrowRecord {
    /// Open a new borrow cycle.
    pub fn open(
        user_id: impl Into<String>,
        username: impl Into<String>,
        borrowed_at: DateTime<Utc>,
    ) -> ValidationResult<Self> {
        let user_id = user_id.into();
        let username = username.into();
        if is_blank(&user_id) || is_blank(&username) {
            return Err(ValidationError::EmptyBorrower);
        }
        Ok(Self {
            user_id,
            username,
            borrowed_at,
            returned_at: None,
        })
    }

    /// Return a closed copy of this record.
    pub fn close(&self, returned_at: DateTime<Utc>) -> ValidationResult<Self> {
        if self.returned_at.is_some() {
            return Err(ValidationError::NotBorrowed);
        }
        Ok(Self {
            returned_at: Some(returned_at),
            ..self.clone()
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn borrowed_at(&self) -> DateTime<Utc> {
        self.borrowed_at
    }

    pub fn returned_at(&self) -> Option<DateTime<Utc>> {
        self.returned_at
    }

    /// `true` while the item is out on this loan.
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }
}

/// History line, e.g. `user Ann (s1) borrowed this item at 2024-01-01T00:00:00.000Z.`
impl core::fmt::Display for BorrowRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "user {} ({}) borrowed this item at {}",
            self.username,
            self.user_id,
            iso(self.borrowed_at)
        )?;
        match self.returned_at {
            Some(at) => write!(f, " returned this item at {}", iso(at)),
            None => f.write_str("."),
        }
    }
}

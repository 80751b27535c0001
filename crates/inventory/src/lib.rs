//! Inventory domain module.
//!
//! Items, their borrow history and followup metadata, plus the service that
//! validates lifecycle transitions before handing durable state to a
//! [`PersistencePort`].

pub mod error;
pub mod feed;
pub mod followup;
pub mod item;
pub mod port;
pub mod record;
pub mod report;
pub mod service;
pub mod timestamp;

pub use error::{ServiceError, ServiceResult};
pub use feed::ItemFeed;
pub use followup::Followup;
pub use item::Item;
pub use port::{PersistenceError, PersistencePort, Snapshot};
pub use record::BorrowRecord;
pub use report::{Report, ReportError, export_report};
pub use service::InventoryService;

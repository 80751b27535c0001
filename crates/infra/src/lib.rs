//! Infrastructure layer: persistence adapters for the inventory service.

pub mod store;

mod integration_tests;

pub use store::{InMemoryItemStore, JsonFileItemStore};

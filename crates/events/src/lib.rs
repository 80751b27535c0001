//! Change notification plumbing.
//!
//! A small pub/sub layer used by persistence adapters to push fresh views of
//! their content to observers.

pub mod bus;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};

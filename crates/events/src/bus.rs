//! Publish/subscribe abstraction (mechanics only).
//!
//! Messages published on a bus are fanned out to every live subscription. Each
//! subscription receives messages in publication order.
//!
//! The bus carries no storage: the publisher's store is the source of truth and
//! a subscriber that falls behind can always ask the store again.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// A subscription to a message stream.
///
/// ## Usage Pattern
///
/// ```ignore
/// let subscription = bus.subscribe();
///
/// loop {
///     match subscription.recv_timeout(Duration::from_secs(1)) {
///         Ok(message) => handle(message),
///         Err(RecvTimeoutError::Timeout) => continue,
///         Err(RecvTimeoutError::Disconnected) => break,
///     }
/// }
/// ```
///
/// Subscriptions are meant for a single consumer.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain every pending message and return only the newest one.
    ///
    /// Returns `None` when nothing is pending. For full-state messages this
    /// skips straight to the most recent state.
    pub fn latest(&self) -> Option<M> {
        let mut newest = None;
        while let Ok(message) = self.receiver.try_recv() {
            newest = Some(message);
        }
        newest
    }
}

/// Transport-agnostic pub/sub bus.
///
/// Implementations must be safe to share across threads; publishing from
/// several threads at once is allowed.
///
/// `publish()` can fail (e.g. lock poisoning in the in-memory bus). Failures are
/// surfaced to the caller, which decides whether a missed notification matters.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}

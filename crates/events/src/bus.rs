//! Notification publishing/subscription abstraction.
//!
//! The page side publishes every external event it observes; the storefront
//! controller holds a [`Subscription`] and drains it on its own schedule.
//!
//! ## Ordering
//!
//! A subscription yields messages in publication order. The controller drains
//! them one at a time and handles each to completion before taking the next,
//! so the last price published is the one left on screen.
//!
//! ## Delivery
//!
//! Rendering is idempotent, so a duplicated notification is harmless: it
//! re-renders the same text.

use std::sync::mpsc::Receiver;

/// A subscription to a notification stream.
///
/// Each subscription receives its own copy of every message published after it
/// was created (broadcast semantics).
///
/// ```ignore
/// let bus = InMemoryEventBus::new();
/// let subscription = bus.subscribe();
/// bus.publish(ExternalEvent::new("variant:change", json!({"variant": {"price": 5000}})))?;
///
/// for event in subscription.drain() {
///     controller.dispatch(&mut tree, &event);
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Everything queued right now, in publication order. Never blocks.
    pub fn drain(&self) -> impl Iterator<Item = M> + '_ {
        self.receiver.try_iter()
    }
}

/// Transport-agnostic pub/sub contract.
///
/// `publish` may fail (e.g. poisoned state); the caller decides whether that
/// matters. Implementations must be shareable across threads even though the
/// controller itself consumes on a single thread.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

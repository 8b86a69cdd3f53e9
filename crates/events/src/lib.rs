//! `hb-events`: external notifications and their transport.
//!
//! The storefront page announces changes through several named channels; this
//! crate wraps them in an [`ExternalEvent`] envelope, moves them over an
//! [`EventBus`], and translates each channel into one internal [`Notification`].

pub mod bus;
pub mod channel;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use channel::{Channel, PRICE_CHANNELS, parse_variant_price, translate};
pub use envelope::ExternalEvent;
pub use event::{Event, Notification};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};

//! `hb-core`: foundation building blocks for the price-benefits engine.
//!
//! This crate contains **pure domain** primitives (no rendering, no event plumbing).

pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{EventId, NodeId};
pub use money::PriceCents;
pub use value_object::ValueObject;

//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Prices, quotes and rates are values: two quotes with the same count, rate
/// and amounts are the same quote. They are immutable; "changing" a price means
/// building a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct PriceCents(u64);
///
/// impl ValueObject for PriceCents {}
///
/// assert_eq!(PriceCents(100), PriceCents(100));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

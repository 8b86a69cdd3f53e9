//! Money amounts in minor currency units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// A non-negative price in cents.
///
/// Every raw input (data attributes, notification payloads, floats) is
/// normalized into this type at the boundary, so downstream code never sees
/// NaN, negative amounts, or prices above [`PriceCents::MAX`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceCents(u64);

impl PriceCents {
    pub const ZERO: PriceCents = PriceCents(0);

    /// Largest accepted price: 2^53 - 1 cents, the largest integer a JSON
    /// number carries exactly in a browser.
    ///
    /// Quotes derived from a price up to this bound always fit in a `u64`.
    pub const MAX: PriceCents = PriceCents(9_007_199_254_740_991);

    /// Trusted construction for literals and derived amounts (quote totals may
    /// exceed [`PriceCents::MAX`]). Untrusted input goes through
    /// [`PriceCents::try_new`], [`PriceCents::try_from_f64`] or
    /// [`PriceCents::coerce`].
    pub const fn new(cents: u64) -> Self {
        Self(cents)
    }

    /// `None` above [`PriceCents::MAX`].
    pub const fn try_new(cents: u64) -> Option<Self> {
        if cents > Self::MAX.0 {
            return None;
        }
        Some(Self(cents))
    }

    pub const fn is_within_bounds(self) -> bool {
        self.0 <= Self::MAX.0
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Whole currency units, truncated (`floor(cents / 100)`).
    pub const fn whole_units(self) -> u64 {
        self.0 / 100
    }

    /// Strict conversion: `None` for NaN, infinities, negative values and
    /// anything above [`PriceCents::MAX`].
    ///
    /// Fractional cents round half away from zero.
    pub fn try_from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let rounded = value.round();
        // 2^53 - 1 is exact in f64, so the cast below is lossless.
        if rounded > Self::MAX.0 as f64 {
            return None;
        }
        Some(Self(rounded as u64))
    }

    /// Lenient conversion: anything [`PriceCents::try_from_f64`] rejects becomes zero.
    pub fn from_f64(value: f64) -> Self {
        Self::try_from_f64(value).unwrap_or(Self::ZERO)
    }

    /// Coerce a string-encoded price (e.g. a `data-*` attribute).
    ///
    /// Missing, empty, unparseable or out-of-range text yields zero.
    pub fn coerce(raw: Option<&str>) -> Self {
        let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::ZERO;
        };

        if let Ok(cents) = text.parse::<u64>() {
            return Self::try_new(cents).unwrap_or(Self::ZERO);
        }

        text.parse::<f64>().map(Self::from_f64).unwrap_or(Self::ZERO)
    }
}

impl ValueObject for PriceCents {}

impl core::fmt::Display for PriceCents {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_reads_integer_text() {
        assert_eq!(PriceCents::coerce(Some("25099")), PriceCents::new(25099));
        assert_eq!(PriceCents::coerce(Some("  42 ")), PriceCents::new(42));
    }

    #[test]
    fn coerce_defaults_to_zero() {
        assert_eq!(PriceCents::coerce(None), PriceCents::ZERO);
        assert_eq!(PriceCents::coerce(Some("")), PriceCents::ZERO);
        assert_eq!(PriceCents::coerce(Some("abc")), PriceCents::ZERO);
        assert_eq!(PriceCents::coerce(Some("-500")), PriceCents::ZERO);
        assert_eq!(PriceCents::coerce(Some("NaN")), PriceCents::ZERO);
        assert_eq!(PriceCents::coerce(Some("inf")), PriceCents::ZERO);
    }

    #[test]
    fn coerce_rounds_fractional_text() {
        assert_eq!(PriceCents::coerce(Some("12.5")), PriceCents::new(13));
        assert_eq!(PriceCents::coerce(Some("12.4")), PriceCents::new(12));
        assert_eq!(PriceCents::coerce(Some("1e3")), PriceCents::new(1000));
    }

    #[test]
    fn strict_float_conversion_rejects_bad_values() {
        assert_eq!(PriceCents::try_from_f64(f64::NAN), None);
        assert_eq!(PriceCents::try_from_f64(f64::INFINITY), None);
        assert_eq!(PriceCents::try_from_f64(-1.0), None);
        assert_eq!(PriceCents::try_from_f64(5000.0), Some(PriceCents::new(5000)));
        assert_eq!(PriceCents::from_f64(f64::NAN), PriceCents::ZERO);
    }

    #[test]
    fn prices_above_the_bound_are_rejected() {
        let max = PriceCents::MAX.get();
        assert_eq!(PriceCents::try_new(max), Some(PriceCents::MAX));
        assert_eq!(PriceCents::try_new(max + 1), None);
        assert_eq!(PriceCents::try_from_f64(max as f64), Some(PriceCents::MAX));
        assert_eq!(PriceCents::try_from_f64(1e25), None);
        assert_eq!(PriceCents::try_from_f64(u64::MAX as f64), None);
        assert!(!PriceCents::new(u64::MAX).is_within_bounds());
    }

    #[test]
    fn coerce_maps_out_of_range_text_to_zero() {
        assert_eq!(PriceCents::coerce(Some("9007199254740991")), PriceCents::MAX);
        assert_eq!(PriceCents::coerce(Some("9007199254740992")), PriceCents::ZERO);
        assert_eq!(PriceCents::coerce(Some("18446744073709551615")), PriceCents::ZERO);
        assert_eq!(PriceCents::coerce(Some("99999999999999999999999")), PriceCents::ZERO);
        assert_eq!(PriceCents::coerce(Some("1e25")), PriceCents::ZERO);
    }

    #[test]
    fn whole_units_truncate() {
        assert_eq!(PriceCents::new(25099).whole_units(), 250);
        assert_eq!(PriceCents::new(99).whole_units(), 0);
    }

    #[test]
    fn display_is_raw_cents() {
        assert_eq!(PriceCents::new(10000).to_string(), "10000");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: integer text survives coercion unchanged.
            #[test]
            fn integer_text_round_trips(cents in 0u64..10_000_000_000) {
                prop_assert_eq!(PriceCents::coerce(Some(&cents.to_string())).get(), cents);
            }

            /// Property: coercion never panics on arbitrary text.
            #[test]
            fn coercion_is_total(raw in ".{0,24}") {
                let _ = PriceCents::coerce(Some(&raw));
            }
        }
    }
}

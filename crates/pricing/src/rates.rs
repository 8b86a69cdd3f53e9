//! Fixed interest-rate table keyed by installment count.

use std::collections::BTreeMap;

use hb_core::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Highest installment count offered.
pub const MAX_INSTALLMENTS: u32 = 12;

/// Highest interest-free installment count.
pub const INTEREST_FREE_UP_TO: u32 = 6;

/// Immutable mapping installment count → interest rate.
///
/// Only counts 7..=12 carry a rate; every other count (including 1..=6 and
/// anything out of range) looks up as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<u32, Decimal>,
}

impl RateTable {
    /// The storefront's standard table.
    pub fn standard() -> Self {
        Self {
            rates: BTreeMap::from([
                (7, dec!(0.0748)),
                (8, dec!(0.081)),
                (9, dec!(0.0872)),
                (10, dec!(0.0917)),
                (11, dec!(0.0979)),
                (12, dec!(0.1042)),
            ]),
        }
    }

    /// Build a custom table.
    ///
    /// Counts must be in `7..=12` and rates in `[0, 1)`.
    pub fn new(entries: impl IntoIterator<Item = (u32, Decimal)>) -> DomainResult<Self> {
        let mut rates = BTreeMap::new();
        for (count, rate) in entries {
            if !(INTEREST_FREE_UP_TO + 1..=MAX_INSTALLMENTS).contains(&count) {
                return Err(DomainError::validation(format!(
                    "installment count {count} cannot carry interest"
                )));
            }
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(DomainError::validation(format!(
                    "rate {rate} for {count}x must be in [0, 1)"
                )));
            }
            rates.insert(count, rate);
        }
        Ok(Self { rates })
    }

    /// Configured rate for `count`, zero when none is configured.
    pub fn rate(&self, count: u32) -> Decimal {
        self.rates.get(&count).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn entries(&self) -> impl Iterator<Item = (u32, Decimal)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rates_are_pinned() {
        let table = RateTable::standard();
        assert_eq!(table.rate(7), dec!(0.0748));
        assert_eq!(table.rate(8), dec!(0.081));
        assert_eq!(table.rate(9), dec!(0.0872));
        assert_eq!(table.rate(10), dec!(0.0917));
        assert_eq!(table.rate(11), dec!(0.0979));
        assert_eq!(table.rate(12), dec!(0.1042));
    }

    #[test]
    fn unknown_counts_look_up_as_zero() {
        let table = RateTable::standard();
        for count in [0, 1, 3, 6, 13, 100, u32::MAX] {
            assert_eq!(table.rate(count), Decimal::ZERO, "count {count}");
        }
    }

    #[test]
    fn custom_table_rejects_interest_free_counts() {
        let err = RateTable::new([(6, dec!(0.01))]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn custom_table_rejects_out_of_range_rates() {
        assert!(RateTable::new([(7, dec!(1))]).is_err());
        assert!(RateTable::new([(7, dec!(-0.01))]).is_err());
        assert!(RateTable::new([(7, dec!(0.5))]).is_ok());
    }
}

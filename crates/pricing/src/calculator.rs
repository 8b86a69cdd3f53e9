//! Per-installment and total amounts for a price.

use hb_core::{DomainError, DomainResult, PriceCents, ValueObject};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::warn;

use crate::rates::{INTEREST_FREE_UP_TO, MAX_INSTALLMENTS, RateTable};

/// Number of installments (always ≥ 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct InstallmentCount(u32);

impl InstallmentCount {
    /// The recommended option shown in the summary and highlighted in the table.
    pub const FEATURED: InstallmentCount = InstallmentCount(INTEREST_FREE_UP_TO);

    pub fn new(count: u32) -> DomainResult<Self> {
        if count == 0 {
            return Err(DomainError::validation("installment count must be at least 1"));
        }
        Ok(Self(count))
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_interest_free(self) -> bool {
        self.0 <= INTEREST_FREE_UP_TO
    }

    pub fn is_featured(self) -> bool {
        self == Self::FEATURED
    }

    /// Every offered count, ascending (`1x` through `12x`).
    pub fn offered() -> impl Iterator<Item = InstallmentCount> {
        (1..=MAX_INSTALLMENTS).map(InstallmentCount)
    }
}

impl core::fmt::Display for InstallmentCount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Derived quote for one installment option. Recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstallmentQuote {
    pub count: InstallmentCount,
    pub rate: Decimal,
    pub per: PriceCents,
    pub total: PriceCents,
}

impl ValueObject for InstallmentQuote {}

impl InstallmentQuote {
    pub fn is_interest_free(&self) -> bool {
        self.rate.is_zero()
    }
}

/// Computes quotes against a [`RateTable`].
#[derive(Debug, Clone, Default)]
pub struct InstallmentCalculator {
    rates: RateTable,
}

impl InstallmentCalculator {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// `total = round(price × (1 + rate))`, `per = round(total / count)`.
    ///
    /// Both roundings are half away from zero on exact decimals. A price above
    /// [`PriceCents::MAX`] is priced as zero, the same as any other unusable
    /// input.
    pub fn compute(&self, price: PriceCents, count: InstallmentCount) -> InstallmentQuote {
        let price = if price.is_within_bounds() {
            price
        } else {
            warn!(%price, %count, "price above the supported maximum; quoting zero");
            PriceCents::ZERO
        };

        let rate = if count.is_interest_free() {
            Decimal::ZERO
        } else {
            self.rates.rate(count.get())
        };

        let total = round_cents(price.as_decimal() * (Decimal::ONE + rate));
        let per = round_cents(total.as_decimal() / Decimal::from(count.get()));

        InstallmentQuote {
            count,
            rate,
            per,
            total,
        }
    }

    /// Quotes for every offered count, ascending.
    pub fn quotes(&self, price: PriceCents) -> impl Iterator<Item = InstallmentQuote> + '_ {
        InstallmentCount::offered().map(move |count| self.compute(price, count))
    }
}

/// Compute a quote against the standard rate table.
pub fn compute(price: PriceCents, count: InstallmentCount) -> InstallmentQuote {
    InstallmentCalculator::default().compute(price, count)
}

/// Callers pass amounts below `2 × PriceCents::MAX` (bounded price, rate < 1),
/// which always fit in a `u64`.
fn round_cents(amount: Decimal) -> PriceCents {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_u64().map_or(PriceCents::ZERO, PriceCents::new)
}

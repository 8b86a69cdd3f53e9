//! Installment pricing: interest table, per-installment computation and
//! currency text.
//!
//! Everything here is pure and deterministic (no IO, no rendering).

pub mod calculator;
pub mod format;
pub mod rates;

pub use calculator::{InstallmentCalculator, InstallmentCount, InstallmentQuote, compute};
pub use format::{CurrencyFormatter, FormatStyle, LocaleRules, format_brl, format_rate};
pub use rates::RateTable;

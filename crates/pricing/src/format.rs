//! Currency and rate text.
//!
//! This is the only place money becomes text; the summary and the table both
//! go through [`CurrencyFormatter::format`].

use hb_core::PriceCents;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// Separator and symbol rules for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleRules {
    pub symbol: &'static str,
    pub symbol_separator: char,
    pub group_separator: char,
    pub decimal_separator: char,
}

impl LocaleRules {
    /// Brazilian Real as rendered for `pt-BR`: `R$ 1.234,56` with a no-break space.
    pub const PT_BR: LocaleRules = LocaleRules {
        symbol: "R$",
        symbol_separator: '\u{a0}',
        group_separator: '.',
        decimal_separator: ',',
    };

    fn lookup(tag: &str) -> Option<LocaleRules> {
        match tag.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "pt-br" => Some(Self::PT_BR),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    Locale(LocaleRules),
    /// `R$ 1234,56`: plain space, no grouping.
    Plain,
}

/// Money formatter. Never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormatter {
    style: FormatStyle,
}

impl CurrencyFormatter {
    pub fn pt_br() -> Self {
        Self {
            style: FormatStyle::Locale(LocaleRules::PT_BR),
        }
    }

    pub fn fallback() -> Self {
        Self {
            style: FormatStyle::Plain,
        }
    }

    /// Formatter for a locale tag; unknown tags get the plain fallback.
    pub fn for_locale(tag: &str) -> Self {
        match LocaleRules::lookup(tag) {
            Some(rules) => Self {
                style: FormatStyle::Locale(rules),
            },
            None => {
                warn!(locale = tag, "no currency rules for locale; using plain format");
                Self::fallback()
            }
        }
    }

    pub fn style(&self) -> FormatStyle {
        self.style
    }

    pub fn is_fallback(&self) -> bool {
        self.style == FormatStyle::Plain
    }

    pub fn format(&self, cents: PriceCents) -> String {
        let units = cents.get() / 100;
        let fraction = cents.get() % 100;

        match self.style {
            FormatStyle::Locale(rules) => format!(
                "{}{}{}{}{:02}",
                rules.symbol,
                rules.symbol_separator,
                group_digits(units, rules.group_separator),
                rules.decimal_separator,
                fraction
            ),
            FormatStyle::Plain => format!("R$ {units},{fraction:02}"),
        }
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::pt_br()
    }
}

/// Format with the standard `pt-BR` rules.
pub fn format_brl(cents: PriceCents) -> String {
    CurrencyFormatter::pt_br().format(cents)
}

/// Rate column text: `sem juros` for zero, else a two-decimal percentage with
/// a decimal comma (`0.0748` → `7,48%`).
pub fn format_rate(rate: Decimal) -> String {
    if rate.is_zero() {
        return "sem juros".to_string();
    }

    let mut percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    percent.rescale(2);
    format!("{}%", percent.to_string().replace('.', ","))
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_pt_br_amounts() {
        assert_eq!(format_brl(PriceCents::new(0)), "R$\u{a0}0,00");
        assert_eq!(format_brl(PriceCents::new(5)), "R$\u{a0}0,05");
        assert_eq!(format_brl(PriceCents::new(10000)), "R$\u{a0}100,00");
        assert_eq!(format_brl(PriceCents::new(123456)), "R$\u{a0}1.234,56");
        assert_eq!(format_brl(PriceCents::new(123456789)), "R$\u{a0}1.234.567,89");
        assert_eq!(format_brl(PriceCents::new(100000000)), "R$\u{a0}1.000.000,00");
    }

    #[test]
    fn unknown_locale_falls_back_to_plain() {
        let formatter = CurrencyFormatter::for_locale("xx-YY");
        assert!(formatter.is_fallback());
        assert_eq!(formatter.format(PriceCents::new(123456)), "R$ 1234,56");
        assert_eq!(formatter.format(PriceCents::ZERO), "R$ 0,00");
    }

    #[test]
    fn locale_tags_are_normalized() {
        assert!(!CurrencyFormatter::for_locale("pt_BR").is_fallback());
        assert!(!CurrencyFormatter::for_locale(" PT-br ").is_fallback());
    }

    #[test]
    fn rate_labels() {
        assert_eq!(format_rate(Decimal::ZERO), "sem juros");
        assert_eq!(format_rate(dec!(0.0748)), "7,48%");
        assert_eq!(format_rate(dec!(0.081)), "8,10%");
        assert_eq!(format_rate(dec!(0.0872)), "8,72%");
        assert_eq!(format_rate(dec!(0.0917)), "9,17%");
        assert_eq!(format_rate(dec!(0.0979)), "9,79%");
        assert_eq!(format_rate(dec!(0.1042)), "10,42%");
    }

    #[test]
    fn digit_grouping() {
        assert_eq!(group_digits(0, '.'), "0");
        assert_eq!(group_digits(999, '.'), "999");
        assert_eq!(group_digits(1000, '.'), "1.000");
        assert_eq!(group_digits(12345678, '.'), "12.345.678");
    }
}

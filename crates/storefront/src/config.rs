//! Storefront configuration.
//!
//! Defaults match the theme's markup; a JSON document can override any subset
//! of fields, and two environment variables select the document and locale.

use std::path::Path;

use hb_core::{DomainError, DomainResult};
use hb_pricing::{CurrencyFormatter, InstallmentCalculator};
use hb_render::{Marker, RenderPipeline, SlotMarkers};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Path to a JSON configuration document.
pub const CONFIG_PATH_ENV: &str = "HB_BENEFITS_CONFIG";

/// Locale tag override (e.g. `pt-BR`).
pub const LOCALE_ENV: &str = "HB_BENEFITS_LOCALE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenefitsConfig {
    /// Marks a benefits root.
    pub root: Marker,
    /// `data-*` key holding the root's price in cents.
    pub price_key: String,
    /// `data-*` key flagging a root as already initialized.
    pub init_key: String,
    pub locale: String,
    pub slots: SlotMarkers,
}

impl Default for BenefitsConfig {
    fn default() -> Self {
        Self {
            root: Marker::attribute("data-hb-benefits"),
            price_key: "hb-price".to_string(),
            init_key: "hb-benefits-init".to_string(),
            locale: "pt-BR".to_string(),
            slots: SlotMarkers::default(),
        }
    }
}

impl BenefitsConfig {
    /// Parse a (partial) JSON document over the defaults.
    pub fn from_json(raw: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| DomainError::validation(format!("benefits config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DomainError::validation(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Load from the process environment. Never fails.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BenefitsConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) => Self::from_path(&path).unwrap_or_else(|err| {
                warn!(%path, error = %err, "unusable benefits config; using defaults");
                Self::default()
            }),
            None => Self::default(),
        };

        if let Some(locale) = lookup(LOCALE_ENV).filter(|l| !l.trim().is_empty()) {
            config.locale = locale;
        }

        config
    }

    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            ("price_key", &self.price_key),
            ("init_key", &self.init_key),
            ("slots.featured_class", &self.slots.featured_class),
        ] {
            if value.trim().is_empty() || value.contains(char::is_whitespace) {
                return Err(DomainError::validation(format!(
                    "{field} must be a non-empty token, got {value:?}"
                )));
            }
        }
        if self.price_key == self.init_key {
            return Err(DomainError::validation("price_key and init_key must differ"));
        }
        Ok(())
    }

    pub fn formatter(&self) -> CurrencyFormatter {
        CurrencyFormatter::for_locale(&self.locale)
    }

    pub fn pipeline(&self) -> RenderPipeline {
        RenderPipeline::new(
            InstallmentCalculator::default(),
            self.formatter(),
            self.slots.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_theme_markup() {
        let config = BenefitsConfig::default();
        assert_eq!(config.root.to_string(), "[data-hb-benefits]");
        assert_eq!(config.slots.table_body.to_string(), "[data-hb-table-body]");
        assert_eq!(config.slots.price.to_string(), ".hb-benefits__price");
        assert!(config.validate().is_ok());
        assert!(!config.formatter().is_fallback());
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let config = BenefitsConfig::from_json(
            r#"{"locale": "en-US", "slots": {"price": ".product-price"}}"#,
        )
        .unwrap();
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.slots.price, Marker::class("product-price"));
        assert_eq!(config.slots.points, Marker::class("hb-benefits__points"));
        assert_eq!(config.price_key, "hb-price");
        assert!(config.formatter().is_fallback());
    }

    #[test]
    fn invalid_json_is_a_validation_error() {
        assert!(matches!(
            BenefitsConfig::from_json(r#"{"root": "div"}"#),
            Err(DomainError::Validation(_))
        ));
        assert!(BenefitsConfig::from_json("{").is_err());
        assert!(BenefitsConfig::from_json(r#"{"price_key": ""}"#).is_err());
        assert!(BenefitsConfig::from_json(r#"{"init_key": "hb-price"}"#).is_err());
    }

    #[test]
    fn lookup_applies_locale_override() {
        let config = BenefitsConfig::from_lookup(|key| match key {
            LOCALE_ENV => Some("xx".to_string()),
            _ => None,
        });
        assert_eq!(config.locale, "xx");
    }

    #[test]
    fn unreadable_config_path_falls_back_to_defaults() {
        let config = BenefitsConfig::from_lookup(|key| match key {
            CONFIG_PATH_ENV => Some("/definitely/not/here.json".to_string()),
            _ => None,
        });
        assert_eq!(config, BenefitsConfig::default());
    }
}

//! Adapter from external channel names to [`Notification`]s.

use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::debug;

use hb_core::PriceCents;

use crate::envelope::ExternalEvent;
use crate::event::Notification;

/// External channels the page may fire on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    VariantChange,
    ThemeVariantChange,
    ProductVariantChange,
    ContentLoaded,
    SectionLoad,
    ProductInfoLoaded,
}

/// The three synonymous "active price changed" channels.
pub const PRICE_CHANNELS: [Channel; 3] = [
    Channel::VariantChange,
    Channel::ThemeVariantChange,
    Channel::ProductVariantChange,
];

impl Channel {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "variant:change" => Some(Channel::VariantChange),
            "theme:variant:change" => Some(Channel::ThemeVariantChange),
            "product:variant-change" => Some(Channel::ProductVariantChange),
            "DOMContentLoaded" => Some(Channel::ContentLoaded),
            "shopify:section:load" => Some(Channel::SectionLoad),
            "product-info:loaded" => Some(Channel::ProductInfoLoaded),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::VariantChange => "variant:change",
            Channel::ThemeVariantChange => "theme:variant:change",
            Channel::ProductVariantChange => "product:variant-change",
            Channel::ContentLoaded => "DOMContentLoaded",
            Channel::SectionLoad => "shopify:section:load",
            Channel::ProductInfoLoaded => "product-info:loaded",
        }
    }

    pub fn carries_price(self) -> bool {
        PRICE_CHANNELS.contains(&self)
    }
}

#[derive(Debug, Deserialize)]
struct VariantDetail {
    variant: Option<VariantPayload>,
}

#[derive(Debug, Deserialize)]
struct VariantPayload {
    price: Option<Number>,
}

/// Extract `variant.price` from a notification `detail`.
///
/// The price must be a JSON number no larger than [`PriceCents::MAX`].
/// Negative numbers are rejected; fractional cents round half away from zero.
pub fn parse_variant_price(detail: &Value) -> Option<PriceCents> {
    let detail = VariantDetail::deserialize(detail).ok()?;
    let price = detail.variant?.price?;

    match price.as_u64() {
        Some(cents) => PriceCents::try_new(cents),
        None => price.as_f64().and_then(PriceCents::try_from_f64),
    }
}

/// Translate an envelope into its channel and internal notification.
///
/// `None` means "ignore": an unknown channel, or a price channel whose payload
/// has no usable price.
pub fn translate(event: &ExternalEvent) -> Option<(Channel, Notification)> {
    let channel = Channel::from_name(event.name())?;
    let occurred_at = event.observed_at();

    let notification = match channel {
        Channel::VariantChange | Channel::ThemeVariantChange | Channel::ProductVariantChange => {
            let Some(price) = parse_variant_price(event.detail()) else {
                debug!(
                    event_id = %event.event_id(),
                    channel = channel.name(),
                    "ignoring price notification without a numeric variant.price"
                );
                return None;
            };
            Notification::PriceChanged { price, occurred_at }
        }
        Channel::ContentLoaded => Notification::DocumentReady { occurred_at },
        Channel::SectionLoad | Channel::ProductInfoLoaded => Notification::ScopeLoaded {
            scope: event.target(),
            occurred_at,
        },
    };

    Some((channel, notification))
}

//! `hb-storefront`: price benefits widget for product pages.
//!
//! Wires the pricing engine, the render pipeline and the notification adapter
//! into a controller that keeps each benefits root in sync with the active
//! variant price.

pub mod config;
pub mod controller;

pub use config::BenefitsConfig;
pub use controller::{BenefitsController, Listener, RootState};

pub use hb_core::PriceCents;
pub use hb_pricing::{CurrencyFormatter, RateTable, compute, format_brl};
pub use hb_render::RenderPipeline;

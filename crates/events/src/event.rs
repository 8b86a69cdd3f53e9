use chrono::{DateTime, Utc};

use hb_core::{NodeId, PriceCents};

/// An internal, already-validated signal.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable type identifier (e.g. "benefits.price.changed").
    fn event_type(&self) -> &'static str;

    /// When the triggering external event was observed.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// What the controller reacts to.
///
/// Several external channel names can collapse into the same variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The active price changed (variant selection).
    PriceChanged {
        price: PriceCents,
        occurred_at: DateTime<Utc>,
    },
    /// The document finished loading.
    DocumentReady { occurred_at: DateTime<Utc> },
    /// A subtree was (re)inserted and may contain new roots.
    ScopeLoaded {
        scope: Option<NodeId>,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for Notification {
    fn event_type(&self) -> &'static str {
        match self {
            Notification::PriceChanged { .. } => "benefits.price.changed",
            Notification::DocumentReady { .. } => "document.ready",
            Notification::ScopeLoaded { .. } => "document.scope.loaded",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Notification::PriceChanged { occurred_at, .. }
            | Notification::DocumentReady { occurred_at }
            | Notification::ScopeLoaded { occurred_at, .. } => *occurred_at,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use hb_core::{EventId, NodeId};

/// An event as the page emitted it: channel name, free-form `detail` payload,
/// and the node it was dispatched on (if any).
///
/// Nothing here is validated; [`crate::translate`] decides what the envelope
/// means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalEvent {
    event_id: EventId,
    name: String,
    #[serde(default)]
    target: Option<NodeId>,
    #[serde(default)]
    detail: Value,
    observed_at: DateTime<Utc>,
}

impl ExternalEvent {
    pub fn new(name: impl Into<String>, detail: Value) -> Self {
        Self {
            event_id: EventId::new(),
            name: name.into(),
            target: None,
            detail,
            observed_at: Utc::now(),
        }
    }

    /// An event without payload (e.g. `DOMContentLoaded`).
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Value::Null)
    }

    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn detail(&self) -> &Value {
        &self.detail
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

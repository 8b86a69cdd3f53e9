//! Presentation-tree capability.

use core::str::FromStr;

use hb_core::{DomainError, NodeId};
use serde::{Deserialize, Serialize};

/// Document loading state, as far as bootstrapping cares.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// How a node is located: by class (`.name`) or by attribute presence (`[name]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Marker {
    Class(String),
    Attribute(String),
}

impl Marker {
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Self::Attribute(name.into())
    }
}

impl FromStr for Marker {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let marker = if let Some(class) = s.strip_prefix('.') {
            Marker::Class(class.to_string())
        } else if let Some(attr) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            Marker::Attribute(attr.trim().to_string())
        } else {
            return Err(DomainError::validation(format!(
                "marker `{s}` must look like `.class` or `[attribute]`"
            )));
        };

        match &marker {
            Marker::Class(name) | Marker::Attribute(name)
                if name.is_empty() || name.contains(char::is_whitespace) =>
            {
                Err(DomainError::validation(format!("marker `{s}` has no usable name")))
            }
            _ => Ok(marker),
        }
    }
}

impl TryFrom<String> for Marker {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Marker> for String {
    fn from(value: Marker) -> Self {
        value.to_string()
    }
}

impl core::fmt::Display for Marker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Marker::Class(name) => write!(f, ".{name}"),
            Marker::Attribute(name) => write!(f, "[{name}]"),
        }
    }
}

/// What the engine needs from a UI tree.
///
/// Every mutating call on a node the tree does not know is a no-op; the
/// engine treats a missing node the same as a missing slot.
pub trait PresentationTree {
    /// The top of the document (scope for a full `start`).
    fn document_root(&self) -> NodeId;

    fn ready_state(&self) -> ReadyState;

    /// `true` while `node` is attached to the document.
    fn contains(&self, node: NodeId) -> bool;

    fn matches(&self, node: NodeId, marker: &Marker) -> bool;

    /// First descendant of `scope` (document order, `scope` excluded) carrying `marker`.
    fn find(&self, scope: NodeId, marker: &Marker) -> Option<NodeId>;

    /// Every descendant of `scope` (document order, `scope` excluded) carrying `marker`.
    fn find_all(&self, scope: NodeId, marker: &Marker) -> Vec<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Concatenated text of `node` and its descendants.
    fn text(&self, node: NodeId) -> String;

    /// Replace all content of `node` with `text`.
    fn set_text(&mut self, node: NodeId, text: &str);

    fn clear_children(&mut self, node: NodeId);

    /// Append a new element; `None` if `parent` is unknown.
    fn append_element(&mut self, parent: NodeId, tag: &str) -> Option<NodeId>;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// `data-{key}` attribute value.
    fn data(&self, node: NodeId, key: &str) -> Option<String>;

    fn set_data(&mut self, node: NodeId, key: &str, value: &str);
}

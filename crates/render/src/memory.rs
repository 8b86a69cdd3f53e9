//! Arena-backed in-memory presentation tree.

use std::collections::BTreeMap;

use hb_core::NodeId;

use crate::tree::{Marker, PresentationTree, ReadyState};

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    children: Vec<NodeId>,
}

impl NodeData {
    fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<NodeData>,
}

/// Minimal DOM-like tree.
///
/// Removed nodes free their slot for the next `append_element`. A reused slot
/// gets a new generation, so stale handles keep failing `contains`.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    slots: Vec<Slot>,
    free: Vec<usize>,
    ready_state: ReadyState,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(NodeData::element("#document")),
            }],
            free: Vec::new(),
            ready_state: ReadyState::Complete,
        }
    }

    /// Allocated slots, live or free. Bounded by the peak live node count.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
    }

    /// Set an arbitrary attribute (`class` is handled by [`PresentationTree::add_class`]).
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.live_mut(node) {
            data.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.live(node)?.attributes.get(name).map(String::as_str)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.live(node).map(|n| n.tag.as_str())
    }

    /// Indented outline of `node`'s subtree, one element per line.
    pub fn outline(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_outline(node, 0, &mut out);
        out
    }

    fn write_outline(&self, node: NodeId, depth: usize, out: &mut String) {
        let Some(data) = self.live(node) else {
            return;
        };

        out.push_str(&"  ".repeat(depth));
        out.push_str(&data.tag);
        for class in &data.classes {
            out.push('.');
            out.push_str(class);
        }
        if !data.text.is_empty() {
            out.push_str(" \"");
            out.push_str(&data.text);
            out.push('"');
        }
        out.push('\n');

        for child in &data.children {
            self.write_outline(*child, depth + 1, out);
        }
    }

    fn live(&self, node: NodeId) -> Option<&NodeData> {
        self.slots
            .get(node.index())
            .filter(|slot| slot.generation == node.generation())?
            .node
            .as_ref()
    }

    fn live_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.slots
            .get_mut(node.index())
            .filter(|slot| slot.generation == node.generation())?
            .node
            .as_mut()
    }

    fn allocate(&mut self, tag: &str) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.generation = slot.generation.wrapping_add(1);
                slot.node = Some(NodeData::element(tag));
                NodeId::new(index, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(NodeData::element(tag)),
                });
                NodeId::from_index(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, node: NodeId) {
        let Some(data) = self
            .slots
            .get_mut(node.index())
            .filter(|slot| slot.generation == node.generation())
            .and_then(|slot| slot.node.take())
        else {
            return;
        };
        self.free.push(node.index());
        for child in data.children {
            self.release(child);
        }
    }

    fn descendants(&self, scope: NodeId, out: &mut Vec<NodeId>) {
        if let Some(data) = self.live(scope) {
            for child in &data.children {
                out.push(*child);
                self.descendants(*child, out);
            }
        }
    }
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationTree for MemoryTree {
    fn document_root(&self) -> NodeId {
        NodeId::from_index(0)
    }

    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn contains(&self, node: NodeId) -> bool {
        self.live(node).is_some()
    }

    fn matches(&self, node: NodeId, marker: &Marker) -> bool {
        let Some(data) = self.live(node) else {
            return false;
        };
        match marker {
            Marker::Class(class) => data.classes.iter().any(|c| c == class),
            Marker::Attribute(name) => data.attributes.contains_key(name),
        }
    }

    fn find(&self, scope: NodeId, marker: &Marker) -> Option<NodeId> {
        let mut all = Vec::new();
        self.descendants(scope, &mut all);
        all.into_iter().find(|n| self.matches(*n, marker))
    }

    fn find_all(&self, scope: NodeId, marker: &Marker) -> Vec<NodeId> {
        let mut all = Vec::new();
        self.descendants(scope, &mut all);
        all.retain(|n| self.matches(*n, marker));
        all
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.live(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn text(&self, node: NodeId) -> String {
        let Some(data) = self.live(node) else {
            return String::new();
        };
        let mut text = data.text.clone();
        for child in &data.children {
            text.push_str(&self.text(*child));
        }
        text
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if !self.contains(node) {
            return;
        }
        self.clear_children(node);
        if let Some(data) = self.live_mut(node) {
            data.text = text.to_string();
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = match self.live_mut(node) {
            Some(data) => std::mem::take(&mut data.children),
            None => return,
        };
        for child in children {
            self.release(child);
        }
    }

    fn append_element(&mut self, parent: NodeId, tag: &str) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.allocate(tag);
        self.live_mut(parent)?.children.push(id);
        Some(id)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.live_mut(node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.live(node).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn data(&self, node: NodeId, key: &str) -> Option<String> {
        self.attribute(node, &format!("data-{key}")).map(str::to_string)
    }

    fn set_data(&mut self, node: NodeId, key: &str, value: &str) {
        self.set_attribute(node, &format!("data-{key}"), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_walks_descendants_in_document_order() {
        let mut tree = MemoryTree::new();
        let doc = tree.document_root();
        let a = tree.append_element(doc, "div").unwrap();
        let a1 = tree.append_element(a, "span").unwrap();
        let b = tree.append_element(doc, "div").unwrap();
        tree.add_class(a1, "hit");
        tree.add_class(b, "hit");

        let marker = Marker::class("hit");
        assert_eq!(tree.find(doc, &marker), Some(a1));
        assert_eq!(tree.find_all(doc, &marker), vec![a1, b]);
        assert_eq!(tree.find(a1, &marker), None);
    }

    #[test]
    fn clearing_detaches_the_whole_subtree() {
        let mut tree = MemoryTree::new();
        let doc = tree.document_root();
        let body = tree.append_element(doc, "tbody").unwrap();
        let row = tree.append_element(body, "tr").unwrap();
        let cell = tree.append_element(row, "td").unwrap();

        tree.clear_children(body);

        assert!(tree.contains(body));
        assert!(!tree.contains(row));
        assert!(!tree.contains(cell));
        assert!(tree.children(body).is_empty());
        assert_eq!(tree.append_element(row, "td"), None);
    }

    #[test]
    fn freed_slots_are_reused_without_reviving_stale_handles() {
        let mut tree = MemoryTree::new();
        let doc = tree.document_root();
        let body = tree.append_element(doc, "tbody").unwrap();
        let old_row = tree.append_element(body, "tr").unwrap();
        let slots = tree.slot_count();

        tree.clear_children(body);
        let new_row = tree.append_element(body, "tr").unwrap();

        assert_eq!(tree.slot_count(), slots);
        assert_eq!(new_row.index(), old_row.index());
        assert_ne!(new_row, old_row);
        assert!(!tree.contains(old_row));
        assert!(tree.contains(new_row));
        tree.set_text(old_row, "stale");
        assert_eq!(tree.text(new_row), "");
    }

    #[test]
    fn repeated_rebuilds_keep_the_arena_bounded() {
        let mut tree = MemoryTree::new();
        let doc = tree.document_root();
        let body = tree.append_element(doc, "tbody").unwrap();

        for _ in 0..1000 {
            tree.clear_children(body);
            for _ in 0..12 {
                let row = tree.append_element(body, "tr").unwrap();
                tree.append_element(row, "td").unwrap();
            }
        }

        assert_eq!(tree.children(body).len(), 12);
        assert_eq!(tree.slot_count(), 2 + 12 * 2);
    }

    #[test]
    fn text_concatenates_descendants() {
        let mut tree = MemoryTree::new();
        let doc = tree.document_root();
        let row = tree.append_element(doc, "tr").unwrap();
        let a = tree.append_element(row, "td").unwrap();
        let b = tree.append_element(row, "td").unwrap();
        tree.set_text(a, "1x");
        tree.set_text(b, "sem juros");
        assert_eq!(tree.text(row), "1xsem juros");

        tree.set_text(row, "replaced");
        assert_eq!(tree.text(row), "replaced");
        assert!(!tree.contains(a));
    }

    #[test]
    fn data_attributes_use_the_data_prefix() {
        let mut tree = MemoryTree::new();
        let doc = tree.document_root();
        let root = tree.append_element(doc, "div").unwrap();
        tree.set_attribute(root, "data-hb-price", "100");

        assert_eq!(tree.data(root, "hb-price").as_deref(), Some("100"));
        tree.set_data(root, "hb-price", "200");
        assert_eq!(tree.attribute(root, "data-hb-price"), Some("200"));
        assert!(tree.matches(root, &Marker::attribute("data-hb-price")));
    }

    #[test]
    fn unknown_nodes_are_ignored() {
        let mut tree = MemoryTree::new();
        let ghost = NodeId::from_index(99);
        tree.set_text(ghost, "x");
        tree.add_class(ghost, "x");
        assert!(!tree.contains(ghost));
        assert_eq!(tree.text(ghost), "");
        assert_eq!(tree.append_element(ghost, "td"), None);
    }
}

//! Rendering installment quotes onto a presentation tree.
//!
//! The tree is an injected capability ([`PresentationTree`]); the engine never
//! owns the nodes it writes into. [`MemoryTree`] is the in-process
//! implementation used by tests and the preview binary.

pub mod memory;
pub mod pipeline;
pub mod tree;

pub use memory::MemoryTree;
pub use pipeline::{RenderPipeline, SlotMarkers, installment_hint, points_hint};
pub use tree::{Marker, PresentationTree, ReadyState};

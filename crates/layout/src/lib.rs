use css::{Edges, Position};
use html::Id;
use std::collections::HashMap;

mod block;
pub mod offsets;

pub use block::{LINE_HEIGHT, layout_document};
pub use offsets::offset_rect;

/// A rectangle in CSS px units, document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// What kind of node produced a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxKind {
    /// The document itself; the initial containing block.
    Root,
    /// `<html>`.
    RootElement,
    /// `<body>`; the fallback offset parent.
    Body,
    Block,
}

/// Geometry of one element's box after layout.
#[derive(Clone, Debug)]
pub struct BoxGeometry {
    pub node: Id,
    pub kind: BoxKind,
    /// Index of the parent box in `LayoutTree::boxes`.
    pub parent: Option<usize>,
    /// Border box.
    pub rect: Rect,
    pub border: Edges,
    pub position: Position,
}

/// Owned result of one layout pass. Boxes are stored in pre-order, so a parent always
/// precedes its children. Elements with `display: none` (and their subtrees) have no box.
#[derive(Clone, Debug, Default)]
pub struct LayoutTree {
    pub boxes: Vec<BoxGeometry>,
    by_node: HashMap<Id, usize>,
}

impl LayoutTree {
    pub(crate) fn push(&mut self, geometry: BoxGeometry) -> usize {
        let index = self.boxes.len();
        self.by_node.insert(geometry.node, index);
        self.boxes.push(geometry);
        index
    }

    pub fn box_for(&self, node: Id) -> Option<&BoxGeometry> {
        self.by_node.get(&node).map(|&i| &self.boxes[i])
    }

    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = &BoxGeometry> + '_ {
        let mut next = self.boxes.get(index).and_then(|b| b.parent);
        std::iter::from_fn(move || {
            let current = next?;
            next = self.boxes[current].parent;
            Some(&self.boxes[current])
        })
    }

    pub fn index_of(&self, node: Id) -> Option<usize> {
        self.by_node.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

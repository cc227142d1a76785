//! `offsetLeft` / `offsetTop` / `offsetWidth` / `offsetHeight` over a finished layout.
use crate::{BoxGeometry, BoxKind, LayoutTree};
use core_types::Rectangle;
use css::Position;
use html::Id;

/// The box an element's offsets are measured from.
///
/// `None` for `<html>`, `<body>`, fixed boxes and nodes without a box. Otherwise the
/// nearest positioned ancestor, falling back to `<body>`.
pub fn offset_parent(tree: &LayoutTree, node: Id) -> Option<&BoxGeometry> {
    let index = tree.index_of(node)?;
    let geometry = &tree.boxes[index];
    if geometry.position == Position::Fixed
        || matches!(geometry.kind, BoxKind::Root | BoxKind::RootElement | BoxKind::Body)
    {
        return None;
    }

    let mut body = None;
    for ancestor in tree.ancestors(index) {
        match ancestor.kind {
            BoxKind::Body => {
                if ancestor.position.is_positioned() {
                    return Some(ancestor);
                }
                body = Some(ancestor);
            }
            BoxKind::Block | BoxKind::RootElement if ancestor.position.is_positioned() => {
                return Some(ancestor);
            }
            _ => {}
        }
    }
    body
}

/// Offset geometry of `node`, rounded to whole px like the DOM `offset*` properties.
///
/// Position is relative to the offset parent's padding edge; when the offset parent is
/// `<body>` or there is none, relative to the document origin. Nodes without a box
/// (e.g. under `display: none`) read as all zeros.
pub fn offset_rect(tree: &LayoutTree, node: Id) -> Rectangle {
    let Some(geometry) = tree.box_for(node) else {
        return Rectangle::ZERO;
    };

    let (origin_x, origin_y) = match offset_parent(tree, node) {
        Some(parent) if parent.kind != BoxKind::Body => (
            parent.rect.x + parent.border.left,
            parent.rect.y + parent.border.top,
        ),
        _ => (0.0, 0.0),
    };

    Rectangle {
        left: (geometry.rect.x - origin_x).round(),
        top: (geometry.rect.y - origin_y).round(),
        height: geometry.rect.height.round(),
        width: geometry.rect.width.round(),
    }
}

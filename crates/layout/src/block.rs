use crate::{BoxGeometry, BoxKind, LayoutTree, Rect, Viewport};
use css::{Display, Position, StyledNode};
use html::NodeKind;

/// Height of one run of text. There are no text metrics; every run is a single line.
pub const LINE_HEIGHT: f32 = 20.0;

/// Where out-of-flow boxes are placed: the padding box of the nearest positioned ancestor.
#[derive(Clone, Copy, Debug)]
struct ContainingBlock {
    x: f32,
    y: f32,
    width: f32,
}

struct FlowContext {
    viewport: Viewport,
    /// Containing block for `position: absolute` descendants.
    positioned: ContainingBlock,
    /// Accumulated `position: relative` shift of the ancestors.
    shift: (f32, f32),
}

/// Lay out a styled document as block flow.
///
/// Supported: block boxes with px widths/heights, margins (adjacent siblings collapse),
/// borders and paddings; `position` relative/absolute/fixed with px `left`/`top`.
/// Inline-level elements are laid out as blocks, and each run of non-whitespace text
/// takes one line of `LINE_HEIGHT`.
pub fn layout_document(root: &StyledNode<'_>, viewport: Viewport) -> LayoutTree {
    let mut tree = LayoutTree::default();
    let icb = ContainingBlock {
        x: 0.0,
        y: 0.0,
        width: viewport.width,
    };
    let root_index = tree.push(BoxGeometry {
        node: root.node.id(),
        kind: BoxKind::Root,
        parent: None,
        rect: Rect {
            x: 0.0,
            y: 0.0,
            width: viewport.width,
            height: 0.0,
        },
        border: css::Edges::zero(),
        position: Position::Static,
    });

    let mut ctx = FlowContext {
        viewport,
        positioned: icb,
        shift: (0.0, 0.0),
    };
    let height = layout_children(root, root_index, icb, &mut tree, &mut ctx);
    tree.boxes[root_index].rect.height = height.max(viewport.height);

    log::trace!(target: "layout", "laid out {} boxes", tree.len());
    tree
}

/// Lay out the in-flow and out-of-flow children of `parent` inside `content`.
/// Returns the content height taken by in-flow children.
fn layout_children(
    parent: &StyledNode<'_>,
    parent_index: usize,
    content: ContainingBlock,
    tree: &mut LayoutTree,
    ctx: &mut FlowContext,
) -> f32 {
    let mut cursor = content.y;
    let mut pending_margin = 0.0f32;
    let mut in_text_run = false;

    for child in &parent.children {
        match &child.node.kind {
            NodeKind::Text(text) => {
                if text.trim().is_empty() || in_text_run {
                    continue;
                }
                in_text_run = true;
                cursor += pending_margin + LINE_HEIGHT;
                pending_margin = 0.0;
            }
            NodeKind::Element(_) => {
                if child.style.display == Display::None {
                    continue;
                }
                if child.style.position.is_out_of_flow() {
                    let static_position = (content.x, cursor + pending_margin);
                    layout_out_of_flow(child, parent_index, static_position, tree, ctx);
                    continue;
                }
                in_text_run = false;
                let margin = child.style.margin;
                let top = cursor + pending_margin.max(margin.top);
                let height = layout_block(child, parent_index, content, top, tree, ctx);
                cursor = top + height;
                pending_margin = margin.bottom;
            }
            NodeKind::Comment(_) | NodeKind::Document { .. } => {}
        }
    }

    cursor + pending_margin - content.y
}

/// Lay out one in-flow block with its border-box top edge at `top` (unshifted).
/// Returns its border-box height.
fn layout_block(
    styled: &StyledNode<'_>,
    parent_index: usize,
    containing: ContainingBlock,
    top: f32,
    tree: &mut LayoutTree,
    ctx: &mut FlowContext,
) -> f32 {
    let style = &styled.style;
    let x = containing.x + style.margin.left;
    let available = containing.width - style.margin.horizontal();
    let saved_shift = ctx.shift;
    if style.position == Position::Relative {
        ctx.shift.0 += style.left.unwrap_or(0.0);
        ctx.shift.1 += style.top.unwrap_or(0.0);
    }
    let height = layout_box_contents(styled, parent_index, x, top, available, tree, ctx);
    ctx.shift = saved_shift;
    height
}

/// Place an absolutely or fixed positioned box. It takes no space in its parent's flow.
fn layout_out_of_flow(
    styled: &StyledNode<'_>,
    parent_index: usize,
    static_position: (f32, f32),
    tree: &mut LayoutTree,
    ctx: &mut FlowContext,
) {
    let style = &styled.style;
    let cb = if style.position == Position::Fixed {
        ContainingBlock {
            x: 0.0,
            y: 0.0,
            width: ctx.viewport.width,
        }
    } else {
        ctx.positioned
    };

    // `cb` is in final coordinates; the ancestors' relative shift is re-applied on store.
    let x = match style.left {
        Some(left) => cb.x + left - ctx.shift.0,
        None => static_position.0,
    } + style.margin.left;
    let y = match style.top {
        Some(top) => cb.y + top - ctx.shift.1,
        None => static_position.1,
    } + style.margin.top;
    let available = cb.width - style.margin.horizontal();

    layout_box_contents(styled, parent_index, x, y, available, tree, ctx);
}

/// Size and store the box for `styled`, then lay out its children.
/// `x`/`y` are the unshifted border-box origin. Returns the border-box height.
fn layout_box_contents(
    styled: &StyledNode<'_>,
    parent_index: usize,
    x: f32,
    y: f32,
    available: f32,
    tree: &mut LayoutTree,
    ctx: &mut FlowContext,
) -> f32 {
    let style = &styled.style;
    let chrome_w = style.border.horizontal() + style.padding.horizontal();
    let chrome_h = style.border.vertical() + style.padding.vertical();
    let content_width = style.width.unwrap_or((available - chrome_w).max(0.0));
    let border_width = content_width + chrome_w;

    let kind = match styled.node.element_name() {
        Some("html") => BoxKind::RootElement,
        Some("body") => BoxKind::Body,
        _ => BoxKind::Block,
    };

    let final_x = x + ctx.shift.0;
    let final_y = y + ctx.shift.1;
    let index = tree.push(BoxGeometry {
        node: styled.node.id(),
        kind,
        parent: Some(parent_index),
        rect: Rect {
            x: final_x,
            y: final_y,
            width: border_width,
            height: 0.0,
        },
        border: style.border,
        position: style.position,
    });

    let content = ContainingBlock {
        x: x + style.border.left + style.padding.left,
        y: y + style.border.top + style.padding.top,
        width: content_width,
    };

    let saved_positioned = ctx.positioned;
    if style.position.is_positioned() {
        ctx.positioned = ContainingBlock {
            x: final_x + style.border.left,
            y: final_y + style.border.top,
            width: content_width + style.padding.horizontal(),
        };
    }
    let children_height = layout_children(styled, index, content, tree, ctx);
    ctx.positioned = saved_positioned;

    let border_height = style.height.unwrap_or(children_height) + chrome_h;
    tree.boxes[index].rect.height = border_height;
    border_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use css::{attach_styles, build_style_tree, parse_stylesheet};
    use html::Node;
    use html::dom_utils::get_attribute;
    use html::traverse::find_by_attribute;

    fn layout(html_src: &str, css_src: &str) -> (Node, LayoutTree) {
        let mut dom = html::parse_document(html_src);
        attach_styles(&mut dom, &parse_stylesheet(css_src));
        let tree = {
            let styled = build_style_tree(&dom);
            layout_document(&styled, Viewport::default())
        };
        (dom, tree)
    }

    fn rect_of(dom: &Node, tree: &LayoutTree, flip: &str) -> Rect {
        let node = find_by_attribute(dom, "data-elm-flip-id", flip).unwrap();
        assert_eq!(get_attribute(node, "data-elm-flip-id"), Some(flip));
        tree.box_for(node.id()).unwrap().rect
    }

    const RESET: &str = "body { margin: 0 }";

    #[test]
    fn blocks_stack_vertically_and_fill_width() {
        let (dom, tree) = layout(
            r#"<body><div data-elm-flip-id="a" style="height: 50px"></div><div data-elm-flip-id="b" style="height: 30px"></div></body>"#,
            RESET,
        );
        assert_eq!(rect_of(&dom, &tree, "a"), Rect { x: 0.0, y: 0.0, width: 800.0, height: 50.0 });
        assert_eq!(rect_of(&dom, &tree, "b"), Rect { x: 0.0, y: 50.0, width: 800.0, height: 30.0 });
    }

    #[test]
    fn margins_borders_and_padding_size_the_border_box() {
        let (dom, tree) = layout(
            r#"<body><div data-elm-flip-id="a" style="margin: 10px; border: 2px solid; padding: 3px; height: 20px"></div></body>"#,
            RESET,
        );
        let r = rect_of(&dom, &tree, "a");
        assert_eq!((r.x, r.y), (10.0, 10.0));
        assert_eq!(r.width, 780.0);
        assert_eq!(r.height, 30.0);
    }

    #[test]
    fn explicit_width_is_content_width() {
        let (dom, tree) = layout(
            r#"<body><div data-elm-flip-id="a" style="width: 100px; padding: 5px; height: 10px"></div></body>"#,
            RESET,
        );
        let r = rect_of(&dom, &tree, "a");
        assert_eq!((r.width, r.height), (110.0, 20.0));
    }

    #[test]
    fn adjacent_sibling_margins_collapse() {
        let (dom, tree) = layout(
            r#"<body><p data-elm-flip-id="a" style="height: 10px"></p><p data-elm-flip-id="b" style="height: 10px"></p></body>"#,
            RESET,
        );
        // p has 16px vertical margins from the user agent sheet.
        assert_eq!(rect_of(&dom, &tree, "a").y, 16.0);
        assert_eq!(rect_of(&dom, &tree, "b").y, 42.0);
    }

    #[test]
    fn auto_height_sums_children_and_text_lines() {
        let (dom, tree) = layout(
            r#"<body><div data-elm-flip-id="a">hello <b>world</b><div style="height: 5px"></div></div></body>"#,
            RESET,
        );
        // one line for "hello", one for the <b> laid out as a block, then 5px
        assert_eq!(rect_of(&dom, &tree, "a").height, LINE_HEIGHT * 2.0 + 5.0);
    }

    #[test]
    fn display_none_has_no_box_and_takes_no_space() {
        let (dom, tree) = layout(
            r#"<body><div data-elm-flip-id="gone" style="display: none; height: 40px"><div data-elm-flip-id="inner"></div></div><div data-elm-flip-id="b" style="height: 1px"></div></body>"#,
            RESET,
        );
        let gone = find_by_attribute(&dom, "data-elm-flip-id", "gone").unwrap();
        let inner = find_by_attribute(&dom, "data-elm-flip-id", "inner").unwrap();
        assert!(tree.box_for(gone.id()).is_none());
        assert!(tree.box_for(inner.id()).is_none());
        assert_eq!(rect_of(&dom, &tree, "b").y, 0.0);
    }

    #[test]
    fn relative_position_shifts_box_and_descendants_without_moving_siblings() {
        let (dom, tree) = layout(
            r#"<body><div data-elm-flip-id="a" style="position: relative; left: 10px; top: 20px; height: 50px"><div data-elm-flip-id="child" style="height: 5px"></div></div><div data-elm-flip-id="b" style="height: 1px"></div></body>"#,
            RESET,
        );
        let a = rect_of(&dom, &tree, "a");
        assert_eq!((a.x, a.y), (10.0, 20.0));
        let child = rect_of(&dom, &tree, "child");
        assert_eq!((child.x, child.y), (10.0, 20.0));
        assert_eq!(rect_of(&dom, &tree, "b").y, 50.0);
    }

    #[test]
    fn absolute_box_is_placed_in_positioned_ancestor_and_out_of_flow() {
        let (dom, tree) = layout(
            r#"<body><div style="height: 100px"></div><div data-elm-flip-id="cb" style="position: relative; border: 4px solid; height: 200px"><div data-elm-flip-id="abs" style="position: absolute; left: 10px; top: 20px; width: 30px; height: 40px"></div><div data-elm-flip-id="flow" style="height: 1px"></div></div></body>"#,
            RESET,
        );
        let abs = rect_of(&dom, &tree, "abs");
        assert_eq!(abs, Rect { x: 14.0, y: 124.0, width: 30.0, height: 40.0 });
        assert_eq!(rect_of(&dom, &tree, "flow").y, 104.0);
    }
}

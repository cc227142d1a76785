use crate::values::{Display, Edges, Position, parse_display, parse_position, parse_px};
use html::Node;

/// Box-model properties the layout engine reads. All lengths are CSS px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    pub position: Position,

    /// `left` / `top` offsets, `None` for `auto`.
    pub left: Option<f32>,
    pub top: Option<f32>,

    /// `None` for `auto`.
    pub width: Option<f32>,
    pub height: Option<f32>,

    pub margin: Edges,
    pub border: Edges,
    pub padding: Edges,
}

impl ComputedStyle {
    pub fn initial() -> Self {
        ComputedStyle {
            display: Display::Block,
            position: Position::Static,
            left: None,
            top: None,
            width: None,
            height: None,
            margin: Edges::zero(),
            border: Edges::zero(),
            padding: Edges::zero(),
        }
    }
}

/// A node in the style tree: pairs a DOM node with its computed style
/// and the styled children.
pub struct StyledNode<'a> {
    pub node: &'a Node,
    pub style: ComputedStyle,
    pub children: Vec<StyledNode<'a>>,
}

/// Compute the style of an element from its cascaded declarations.
///
/// None of the supported properties inherit, so there is no parent input.
/// Unknown properties and unparseable values are ignored.
pub fn compute_style(specified: &[(String, String)]) -> ComputedStyle {
    let mut result = ComputedStyle::initial();

    for (name, value) in specified {
        let value = value.as_str();
        match name.as_str() {
            "display" => {
                if let Some(d) = parse_display(value) {
                    result.display = d;
                }
            }
            "position" => {
                if let Some(p) = parse_position(value) {
                    result.position = p;
                }
            }
            "left" => result.left = parse_auto_or_px(value).unwrap_or(result.left),
            "top" => result.top = parse_auto_or_px(value).unwrap_or(result.top),
            "width" => result.width = parse_auto_or_px(value).unwrap_or(result.width),
            "height" => result.height = parse_auto_or_px(value).unwrap_or(result.height),

            "margin-top" => set_edge(&mut result.margin.top, value),
            "margin-right" => set_edge(&mut result.margin.right, value),
            "margin-bottom" => set_edge(&mut result.margin.bottom, value),
            "margin-left" => set_edge(&mut result.margin.left, value),

            "padding-top" => set_edge(&mut result.padding.top, value),
            "padding-right" => set_edge(&mut result.padding.right, value),
            "padding-bottom" => set_edge(&mut result.padding.bottom, value),
            "padding-left" => set_edge(&mut result.padding.left, value),

            "border-top-width" => set_edge(&mut result.border.top, value),
            "border-right-width" => set_edge(&mut result.border.right, value),
            "border-bottom-width" => set_edge(&mut result.border.bottom, value),
            "border-left-width" => set_edge(&mut result.border.left, value),

            _ => {}
        }
    }

    result
}

/// `Some(None)` for `auto`, `Some(Some(px))` for a length, `None` when unparseable.
fn parse_auto_or_px(value: &str) -> Option<Option<f32>> {
    if value.trim().eq_ignore_ascii_case("auto") {
        return Some(None);
    }
    parse_px(value).map(Some)
}

fn set_edge(edge: &mut f32, value: &str) {
    if let Some(px) = parse_px(value) {
        *edge = px;
    }
}

/// Build a style tree from a DOM whose elements already carry cascaded declarations
/// (see `attach_styles`). Text and comment nodes get the initial style.
pub fn build_style_tree(root: &Node) -> StyledNode<'_> {
    let style = root
        .as_element()
        .map_or_else(ComputedStyle::initial, |element| compute_style(&element.style));
    StyledNode {
        node: root,
        style,
        children: root.children().iter().map(build_style_tree).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decls(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn computes_box_model_longhands() {
        let style = compute_style(&decls(&[
            ("width", "100px"),
            ("height", "auto"),
            ("margin-left", "10px"),
            ("padding-top", "3px"),
            ("border-bottom-width", "1px"),
            ("position", "relative"),
            ("top", "5px"),
        ]));
        assert_eq!(style.width, Some(100.0));
        assert_eq!(style.height, None);
        assert_eq!(style.margin.left, 10.0);
        assert_eq!(style.padding.top, 3.0);
        assert_eq!(style.border.bottom, 1.0);
        assert_eq!(style.position, Position::Relative);
        assert_eq!(style.top, Some(5.0));
    }

    #[test]
    fn invalid_values_keep_previous() {
        let style = compute_style(&decls(&[
            ("width", "10px"),
            ("width", "10em"),
            ("display", "grid"),
            ("margin-top", "-4px"),
        ]));
        assert_eq!(style.width, Some(10.0));
        assert_eq!(style.display, Display::Block);
        assert_eq!(style.margin.top, 0.0);
    }
}

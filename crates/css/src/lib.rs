pub mod syntax;
pub mod cascade;
pub mod values;
pub mod computed;

// Re-exports so other crates can just use `css::...` nicely.
pub use syntax::{Declaration, Rule, Selector, Stylesheet, parse_stylesheet};
pub use cascade::{attach_styles, cascade_element};
pub use values::{Display, Edges, Position, parse_px};
pub use computed::{ComputedStyle, StyledNode, compute_style, build_style_tree};

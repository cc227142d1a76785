/// CSS `display` value. Inline-level values are accepted but laid out as blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    ListItem,
    None,
}

/// CSS `position` value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
}

impl Position {
    pub fn is_positioned(self) -> bool {
        self != Position::Static
    }

    /// Taken out of normal flow.
    pub fn is_out_of_flow(self) -> bool {
        matches!(self, Position::Absolute | Position::Fixed)
    }
}

/// Four box sides in CSS px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn zero() -> Self {
        Edges::default()
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Parse `<number>px` (or a bare `0`). Negative and non-finite values are rejected.
pub fn parse_px(value: &str) -> Option<f32> {
    let v = value.trim();
    let num = match v.strip_suffix("px") {
        Some(stripped) => stripped.trim().parse::<f32>().ok()?,
        None if v == "0" => 0.0,
        None => return None,
    };
    (num.is_finite() && num >= 0.0).then_some(num)
}

/// Parse a 1–4 value box shorthand (`margin: 1px 2px`), CSS order top/right/bottom/left.
pub fn parse_edges(value: &str) -> Option<Edges> {
    let parts = value
        .split_whitespace()
        .map(parse_px)
        .collect::<Option<Vec<f32>>>()?;
    let (top, right, bottom, left) = match parts.as_slice() {
        [all] => (*all, *all, *all, *all),
        [v, h] => (*v, *h, *v, *h),
        [t, h, b] => (*t, *h, *b, *h),
        [t, r, b, l] => (*t, *r, *b, *l),
        _ => return None,
    };
    Some(Edges {
        top,
        right,
        bottom,
        left,
    })
}

/// Parse a `display` value into a Display enum.
pub fn parse_display(value: &str) -> Option<Display> {
    match value.trim().to_ascii_lowercase().as_str() {
        "block" | "flow-root" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "list-item" => Some(Display::ListItem),
        "none" => Some(Display::None),
        _ => None, // unknown / unsupported → ignored
    }
}

pub fn parse_position(value: &str) -> Option<Position> {
    match value.trim().to_ascii_lowercase().as_str() {
        "static" => Some(Position::Static),
        "relative" => Some(Position::Relative),
        "absolute" => Some(Position::Absolute),
        "fixed" => Some(Position::Fixed),
        _ => None,
    }
}

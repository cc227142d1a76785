use crate::syntax::{Declaration, Selector, Stylesheet, parse_declarations, parse_stylesheet};
use crate::values::{parse_edges, parse_px};
use html::Node;
use html::dom_utils::get_attribute;
use std::cmp::Ordering::Equal;
use std::sync::OnceLock;

/// Defaults a browser applies before any author style.
const USER_AGENT_CSS: &str = "
    head, style, script, title, meta, link, template { display: none }
    body { margin: 8px }
    p, ul, ol { margin: 16px 0 }
    ul, ol { padding-left: 40px }
    li { display: list-item }
    span, a, em, strong, b, i, u, small, code, img, label { display: inline }
";

fn user_agent_sheet() -> &'static Stylesheet {
    static SHEET: OnceLock<Stylesheet> = OnceLock::new();
    SHEET.get_or_init(|| parse_stylesheet(USER_AGENT_CSS))
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum Origin {
    UserAgent,
    Author,
    Inline,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
struct Specificity(u16, u16, u16); // (id, class/attribute, type)

struct Candidate {
    property: String,
    value: String,
    origin: Origin,
    specificity: Specificity,
    order: u32,
}

fn specificity_of(selector: &Selector) -> Specificity {
    match selector {
        Selector::Universal => Specificity(0, 0, 0),
        Selector::Type(_) => Specificity(0, 0, 1),
        Selector::Class(_) | Selector::Attribute { .. } => Specificity(0, 1, 0),
        Selector::Id(_) => Specificity(1, 0, 0),
    }
}

// Check if an element matches a selector
fn matches_selector(node: &Node, selector: &Selector) -> bool {
    let Some(name) = node.element_name() else {
        return false;
    };
    match selector {
        Selector::Universal => true,
        Selector::Type(t) => name.eq_ignore_ascii_case(t),
        Selector::Id(want) => get_attribute(node, "id") == Some(want.as_str()),
        Selector::Class(want) => get_attribute(node, "class")
            .map(|classlist| classlist.split_whitespace().any(|c| c == want))
            .unwrap_or(false),
        Selector::Attribute { name, value } => match (get_attribute(node, name), value) {
            (Some(actual), Some(want)) => actual == want,
            (Some(_), None) => true,
            (None, _) => false,
        },
    }
}

/// Expand box shorthands into their longhands so the cascade compares like with like.
/// Unparseable shorthands are kept as-is and later ignored by the computed-style pass.
fn expand_declaration(declaration: &Declaration) -> Vec<(String, String)> {
    let longhands = |prefix: &str, suffix: &str| {
        ["top", "right", "bottom", "left"].map(|side| format!("{prefix}-{side}{suffix}"))
    };
    let edges = match declaration.name.as_str() {
        "margin" | "padding" => parse_edges(&declaration.value)
            .map(|e| (longhands(&declaration.name, ""), e)),
        "border-width" => parse_edges(&declaration.value).map(|e| (longhands("border", "-width"), e)),
        "border" => {
            let width = if declaration.value.trim().eq_ignore_ascii_case("none") {
                Some(0.0)
            } else {
                declaration.value.split_whitespace().find_map(parse_px)
            };
            width.and_then(|w| parse_edges(&format!("{w}px")))
                .map(|e| (longhands("border", "-width"), e))
        }
        _ => None,
    };
    match edges {
        Some((names, e)) => {
            let [top, right, bottom, left] = names;
            vec![
                (top, format!("{}px", e.top)),
                (right, format!("{}px", e.right)),
                (bottom, format!("{}px", e.bottom)),
                (left, format!("{}px", e.left)),
            ]
        }
        None => vec![(declaration.name.clone(), declaration.value.clone())],
    }
}

fn push_declaration(
    candidates: &mut Vec<Candidate>,
    declaration: &Declaration,
    origin: Origin,
    specificity: Specificity,
    order: u32,
) {
    candidates.extend(
        expand_declaration(declaration)
            .into_iter()
            .map(|(property, value)| Candidate {
                property,
                value,
                origin,
                specificity,
                order,
            }),
    );
}

fn collect_rule_candidates(
    node: &Node,
    sheet: &Stylesheet,
    origin: Origin,
    candidates: &mut Vec<Candidate>,
) {
    for (order, rule) in sheet.rules.iter().enumerate() {
        let matched = rule
            .selectors
            .iter()
            .filter(|s| matches_selector(node, s))
            .map(specificity_of)
            .max();
        if let Some(specificity) = matched {
            for declaration in &rule.declarations {
                push_declaration(candidates, declaration, origin, specificity, order as u32);
            }
        }
    }
}

/// Cascaded declarations for one element: one winner per property, sorted by name.
pub fn cascade_element(node: &Node, sheet: &Stylesheet) -> Vec<(String, String)> {
    let mut candidates: Vec<Candidate> = Vec::new();
    collect_rule_candidates(node, user_agent_sheet(), Origin::UserAgent, &mut candidates);
    collect_rule_candidates(node, sheet, Origin::Author, &mut candidates);

    if let Some(inline) = get_attribute(node, "style") {
        for (order, declaration) in parse_declarations(inline).iter().enumerate() {
            push_declaration(
                &mut candidates,
                declaration,
                Origin::Inline,
                Specificity::default(),
                order as u32,
            );
        }
    }

    // resolve winners per property: the last candidate of each run wins
    candidates.sort_by(|a, b| match a.property.cmp(&b.property) {
        Equal => (a.origin, a.specificity, a.order).cmp(&(b.origin, b.specificity, b.order)),
        other => other,
    });

    let mut style: Vec<(String, String)> = Vec::new();
    for candidate in candidates {
        match style.last_mut() {
            Some((property, value)) if *property == candidate.property => {
                *value = candidate.value;
            }
            _ => style.push((candidate.property, candidate.value)),
        }
    }
    style
}

// Walk the DOM tree, and for each element, resolve its declarations into `Element::style`
pub fn attach_styles(dom: &mut Node, sheet: &Stylesheet) {
    if dom.is_element() {
        let resolved = cascade_element(dom, sheet);
        if let Some(element) = dom.as_element_mut() {
            element.style = resolved;
        }
    }
    if let Some(children) = dom.children_mut() {
        for c in children {
            attach_styles(c, sheet);
        }
    }
}

use crate::{Node, NodeKind};

/// Value of attribute `key` on an element. Attribute names are stored lowercased, so the
/// lookup is ASCII case-insensitive on the name and exact on the value. Boolean attributes
/// read as `""`.
pub fn get_attribute<'a>(node: &'a Node, key: &str) -> Option<&'a str> {
    node.attributes()
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_deref().unwrap_or(""))
}

/// Set or replace an attribute. Returns `false` for non-element nodes.
pub fn set_attribute(node: &mut Node, key: &str, value: &str) -> bool {
    let Some(element) = node.as_element_mut() else {
        return false;
    };
    let attributes = &mut element.attributes;
    let key = key.to_ascii_lowercase();
    match attributes.iter_mut().find(|(k, _)| *k == key) {
        Some((_, v)) => *v = Some(value.to_string()),
        None => attributes.push((key, Some(value.to_string()))),
    }
    true
}

/// Remove an attribute. Returns whether it was present.
pub fn remove_attribute(node: &mut Node, key: &str) -> bool {
    let Some(element) = node.as_element_mut() else {
        return false;
    };
    let attributes = &mut element.attributes;
    let before = attributes.len();
    attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
    attributes.len() != before
}

/// Collect concatenated text from <style> elements.
pub fn collect_style_texts(node: &Node, out: &mut String) {
    if node.element_name() == Some("style") {
        for c in node.children() {
            if let NodeKind::Text(text) = &c.kind {
                out.push_str(text);
                out.push('\n');
            }
        }
        return;
    }
    for c in node.children() {
        collect_style_texts(c, out);
    }
}

use crate::dom_utils::get_attribute;
use crate::{Id, Node};

pub fn assign_node_ids(root: &mut Node) {
    fn walk(node: &mut Node, next: &mut u32) {
        // only assign if currently unset
        if node.id() == Id(0) {
            node.set_id(Id(*next));
            *next = next.wrapping_add(1);
        }

        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, next);
            }
        }
    }

    let mut next = 1;
    walk(root, &mut next);
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|c| find_node_by_id_mut(c, id))
}

/// First element in document order whose `name` attribute equals `value` exactly.
/// This is the `[name="value"]` query the measurement side uses.
pub fn find_by_attribute<'a>(node: &'a Node, name: &str, value: &str) -> Option<&'a Node> {
    if get_attribute(node, name) == Some(value) {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|c| find_by_attribute(c, name, value))
}

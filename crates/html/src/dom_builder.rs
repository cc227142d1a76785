use crate::traverse::assign_node_ids;
use crate::types::{Node, NodeKind, Token};

/// Most elements that can be open at once. Every pass over the tree recurses per level,
/// so deeper start tags are inserted as childless siblings instead.
pub const MAX_TREE_DEPTH: usize = 256;

/// Build a document tree from a token stream.
///
/// Open elements live on a stack and are attached to their parent when closed. An end tag
/// closes the nearest open element with the same name (and everything opened after it);
/// end tags without a matching open element are dropped. Ids are assigned in document order.
pub fn build_dom(tokens: &[Token]) -> Node {
    let mut open: Vec<Node> = vec![Node::document()];
    let mut flattened = 0usize;

    for token in tokens {
        match token {
            Token::Doctype(s) => {
                if let NodeKind::Document { doctype } = &mut open[0].kind {
                    *doctype = Some(s.clone());
                }
            }
            Token::Comment(c) => append(&mut open, Node::comment(c.as_str())),
            Token::Text(txt) => {
                if !txt.is_empty() {
                    append(&mut open, Node::text(txt.as_str()));
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = Node::element(name.as_str(), attributes.clone());
                if *self_closing {
                    append(&mut open, element);
                } else if open.len() > MAX_TREE_DEPTH {
                    flattened += 1;
                    append(&mut open, element);
                } else {
                    open.push(element);
                }
            }
            Token::EndTag(name) => {
                let target = open
                    .iter()
                    .rposition(|n| n.element_name() == Some(name.as_str()));
                if let Some(target) = target {
                    while open.len() > target {
                        close_top(&mut open);
                    }
                }
            }
        }
    }

    while open.len() > 1 {
        close_top(&mut open);
    }

    if flattened > 0 {
        log::warn!(
            target: "html.dom_builder",
            "document nests deeper than {MAX_TREE_DEPTH} elements; {flattened} start tags kept as siblings"
        );
    }

    let mut root = open.pop().unwrap_or_else(Node::document);
    assign_node_ids(&mut root);
    root
}

fn append(open: &mut [Node], node: Node) {
    if let Some(children) = open.last_mut().and_then(Node::children_mut) {
        children.push(node);
    }
}

fn close_top(open: &mut Vec<Node>) {
    if open.len() < 2 {
        return;
    }
    if let Some(node) = open.pop() {
        append(open, node);
    }
}

/// Tokenize and build in one step.
pub fn parse_document(input: &str) -> Node {
    build_dom(&crate::tokenize(input))
}

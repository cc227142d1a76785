pub type NodeId = u32;

/// Document-order node id. `Id(0)` means "not assigned yet".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

/// Attribute as written: lowercased name, `None` for a bare boolean attribute.
pub type Attribute = (String, Option<String>);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// Cascaded declarations, filled in by the style pass.
    pub style: Vec<(String, String)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Document { doctype: Option<String> },
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: Id,
    pub kind: NodeKind,
    /// Always empty for text and comment nodes.
    pub children: Vec<Node>,
}

impl Node {
    pub fn document() -> Self {
        Self::leaf(NodeKind::Document { doctype: None })
    }

    pub fn element(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self::leaf(NodeKind::Element(Element {
            name: name.into(),
            attributes,
            style: Vec::new(),
        }))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Text(text.into()))
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Comment(text.into()))
    }

    fn leaf(kind: NodeKind) -> Self {
        Self {
            id: Id::default(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// `None` for nodes that cannot have children.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self.kind {
            NodeKind::Document { .. } | NodeKind::Element(_) => Some(&mut self.children),
            NodeKind::Text(_) | NodeKind::Comment(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    /// Lowercased tag name for elements, `None` otherwise.
    pub fn element_name(&self) -> Option<&str> {
        self.as_element().map(|element| element.name.as_str())
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self.as_element() {
            Some(element) => &element.attributes,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_nodes_refuse_children() {
        let mut text = Node::text("hi");
        assert!(text.children_mut().is_none());
        assert!(text.attributes().is_empty());

        let mut li = Node::element("li", vec![("data-elm-flip-id".into(), Some("a".into()))]);
        li.children_mut().unwrap().push(text);
        assert_eq!(li.children().len(), 1);
        assert_eq!(li.element_name(), Some("li"));
        assert_eq!(li.id(), Id(0));
    }
}

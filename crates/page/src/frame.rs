use app_api::LayoutHost;
use core_types::{ElementHandle, Rectangle};
use html::{Id, Node, traverse::find_by_attribute};
use layout::{LayoutTree, offset_rect};

/// A frame's committed DOM and layout, handed to frame callbacks.
pub struct CommittedFrame<'a> {
    dom: &'a Node,
    layout: &'a LayoutTree,
}

impl<'a> CommittedFrame<'a> {
    pub(crate) fn new(dom: &'a Node, layout: &'a LayoutTree) -> Self {
        Self { dom, layout }
    }
}

impl LayoutHost for CommittedFrame<'_> {
    fn query_by_attribute(&self, attribute: &str, value: &str) -> Option<ElementHandle> {
        find_by_attribute(self.dom, attribute, value).map(|node| ElementHandle(node.id().0))
    }

    fn offset_rect(&self, element: ElementHandle) -> Rectangle {
        offset_rect(self.layout, Id(element.0))
    }
}

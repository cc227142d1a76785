mod frame;

pub use frame::CommittedFrame;

use app_api::{FrameCallback, FrameScheduler};
use core_types::{FlipId, FrameId};
use css::{attach_styles, build_style_tree, parse_stylesheet};
use html::{
    Node,
    dom_utils::{collect_style_texts, remove_attribute, set_attribute},
    traverse::{find_by_attribute, find_node_by_id_mut},
};
use layout::{LayoutTree, Viewport, layout_document};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    #[error("no element with {attribute}=\"{id}\"")]
    UnknownElement { attribute: String, id: FlipId },
}

/// A live document: DOM, styles and the layout committed by the last frame.
///
/// Updates only mark the page dirty; styles and layout are recomputed when the next
/// frame commits, right before that frame's callbacks run.
pub struct Page {
    dom: Node,
    viewport: Viewport,
    flip_attribute: String,
    /// The DOM as of the last commit; `layout` was computed from it.
    committed_dom: Node,
    layout: LayoutTree,
    dirty: bool,
    frame: FrameId,
    callbacks: Vec<FrameCallback>,
}

impl Page {
    pub fn from_html(source: &str, viewport: Viewport, flip_attribute: impl Into<String>) -> Self {
        let mut page = Self {
            dom: html::parse_document(source),
            viewport,
            flip_attribute: flip_attribute.into(),
            committed_dom: Node::document(),
            layout: LayoutTree::default(),
            dirty: true,
            frame: 0,
            callbacks: Vec::new(),
        };
        page.commit();
        page
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frame_id(&self) -> FrameId {
        self.frame
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn pending_callbacks(&self) -> usize {
        self.callbacks.len()
    }

    // -- Document updates ---

    pub fn set_attribute(&mut self, target: &FlipId, name: &str, value: &str) -> Result<(), PageError> {
        let node = self.element_mut(target)?;
        set_attribute(node, name, value);
        self.dirty = true;
        Ok(())
    }

    pub fn remove_attribute(&mut self, target: &FlipId, name: &str) -> Result<(), PageError> {
        let node = self.element_mut(target)?;
        if remove_attribute(node, name) {
            self.dirty = true;
        }
        Ok(())
    }

    pub fn replace_document(&mut self, source: &str) {
        self.dom = html::parse_document(source);
        self.dirty = true;
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        if width.is_finite() && width >= 0.0 && width != self.viewport.width {
            self.viewport.width = width;
            self.dirty = true;
        }
    }

    fn element_mut(&mut self, target: &FlipId) -> Result<&mut Node, PageError> {
        let id = find_by_attribute(&self.dom, &self.flip_attribute, target.as_str()).map(Node::id);
        match id.and_then(|id| find_node_by_id_mut(&mut self.dom, id)) {
            Some(node) => Ok(node),
            None => Err(PageError::UnknownElement {
                attribute: self.flip_attribute.clone(),
                id: target.clone(),
            }),
        }
    }

    // -- Frames ---

    /// Run one frame: commit pending updates, then run the callbacks that were queued
    /// before the frame started, in the order they were queued. Callbacks queued while
    /// this frame runs wait for the next one.
    pub fn run_frame(&mut self) -> FrameId {
        let callbacks = std::mem::take(&mut self.callbacks);
        self.frame += 1;
        self.commit();

        if !callbacks.is_empty() {
            log::trace!(target: "page", "frame {}: running {} callbacks", self.frame, callbacks.len());
        }
        let frame = self.committed();
        for callback in callbacks {
            callback(&frame);
        }
        self.frame
    }

    /// The DOM and layout committed by the last frame, as seen by frame callbacks.
    /// Updates made since then are not visible here.
    pub fn committed(&self) -> CommittedFrame<'_> {
        CommittedFrame::new(&self.committed_dom, &self.layout)
    }

    fn commit(&mut self) {
        if !self.dirty {
            return;
        }
        let mut css_text = String::new();
        collect_style_texts(&self.dom, &mut css_text);
        let sheet = parse_stylesheet(&css_text);
        attach_styles(&mut self.dom, &sheet);

        self.layout = layout_document(&build_style_tree(&self.dom), self.viewport);
        self.committed_dom = self.dom.clone();
        self.dirty = false;
        log::debug!(
            target: "page",
            "frame {} committed layout: {} boxes, {} style rules",
            self.frame,
            self.layout.len(),
            sheet.rules.len()
        );
    }
}

impl FrameScheduler for Page {
    fn request_animation_frame(&mut self, callback: FrameCallback) {
        self.callbacks.push(callback);
    }
}

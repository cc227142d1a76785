use core_types::{ElementHandle, Rectangle};

/// Read-only view of the host's committed layout.
pub trait LayoutHost {
    /// First element in document order whose `attribute` equals `value` exactly.
    fn query_by_attribute(&self, attribute: &str, value: &str) -> Option<ElementHandle>;

    /// Offset geometry of an element. Elements without a layout box read as zeros.
    fn offset_rect(&self, element: ElementHandle) -> Rectangle;
}

/// Runs once, after the frame it was scheduled for has committed its layout.
pub type FrameCallback = Box<dyn FnOnce(&dyn LayoutHost) + Send>;

pub trait FrameScheduler {
    /// Queue `callback` for the next frame. Never runs it synchronously.
    fn request_animation_frame(&mut self, callback: FrameCallback);
}

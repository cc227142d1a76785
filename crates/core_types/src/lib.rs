use serde::{Deserialize, Serialize};
use std::fmt;

pub type RequestId = u64;
pub type FrameId = u64;

/// Host-side handle for a live element, valid for the frame it was looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u32);

/// Opaque token naming a trackable element. Matched by exact string equality
/// against the element's flip attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlipId(pub String);

impl FlipId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FlipId {
    fn from(value: &str) -> Self {
        FlipId(value.to_string())
    }
}

impl From<String> for FlipId {
    fn from(value: String) -> Self {
        FlipId(value)
    }
}

impl fmt::Display for FlipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Offset geometry of an element's border box, in whole CSS px.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub left: f32,
    pub top: f32,
    pub height: f32,
    pub width: f32,
}

impl Rectangle {
    pub const ZERO: Rectangle = Rectangle {
        left: 0.0,
        top: 0.0,
        height: 0.0,
        width: 0.0,
    };
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: FlipId,
    pub rectangle: Rectangle,
}

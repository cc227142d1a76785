pub mod dom_utils;
pub mod traverse;

mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::dom_builder::{MAX_TREE_DEPTH, build_dom, parse_document};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Attribute, Element, Id, Node, NodeId, NodeKind, Token};

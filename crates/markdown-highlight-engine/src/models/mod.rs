pub mod node;
pub mod position;

pub use node::{AttrValue, Element, Highlight, Node, Text};
pub use position::{Point, Position};

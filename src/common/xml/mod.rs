//! XML text helpers shared by the element tree.

mod escape;

pub use escape::{resolve_entity, unescape_xml};

//! Parsing and traversal of Glimmer-style templates.

pub mod ast;
pub mod parse;
pub mod visit;

pub use ast::Node;
pub use parse::{ParseError, parse};
pub use visit::{Visitor, Walk, walk_nodes};

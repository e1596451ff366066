//! Catalog resource and pattern parser.
//!
//! Parses a Fluent-style subset: messages with an optional main pattern and
//! `.attribute` sub-patterns, placeables holding variables, literals,
//! message references and select expressions. The parser produces an AST
//! consumed by the catalog and the pattern formatter.

pub mod ast;
pub mod error;
mod pattern;
mod resource;

pub use ast::*;
pub use error::ParseError;
pub use pattern::parse_pattern;
pub use resource::parse_resource;

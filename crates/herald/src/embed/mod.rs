//! Structured message construction from catalog templates.
//!
//! A template's attributes supply the passthrough properties (`title`,
//! `description`, `url`, `footer-text`) and, through the
//! `field-<name>-<facet>` naming convention, a list of fields. The
//! [`MessageBuilder`] either assembles every piece or returns a fixed
//! fallback message.

mod builder;
mod discovery;
mod error;
mod field_key;
mod message;
mod options;
mod resolver;

pub use builder::{MessageBuilder, Resolution};
pub use discovery::discover_fields;
pub use error::{BuildError, Stage};
pub use field_key::{FieldFacet, FieldKey};
pub use message::{Color, EmbedField, StructuredMessage};
pub use options::{BlockFields, BuildOptions};
pub use resolver::resolve_field;

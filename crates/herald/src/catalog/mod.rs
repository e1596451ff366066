//! Message catalogs.
//!
//! A catalog maps a message id to a read-only [`Template`]. The engine in
//! [`crate::embed`] only sees the [`Catalog`] trait; [`Bundle`] is the
//! file-backed implementation for one language.

mod bundle;
mod error;
mod registry;

pub use bundle::Bundle;
pub use error::{LoadError, LoadWarning};
pub use registry::MessageRegistry;

use crate::parser::ast::Template;

/// Read-only lookup of message templates by id.
///
/// Implementations are shared across concurrent builds, so lookups take
/// `&self` and must not depend on interior mutability.
pub trait Catalog {
    /// Look up the template for a message id.
    fn lookup(&self, message_id: &str) -> Option<&Template>;
}

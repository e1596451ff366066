//! Pattern formatting.
//!
//! Resolves a parsed [`Pattern`] against substitution variables, producing
//! the formatted text plus every error encountered along the way. Errors do
//! not stop formatting: the failing placeable is written as a placeholder
//! such as `{$amount}` and the caller decides whether a non-empty error list
//! invalidates the result.

mod error;
mod plural;
mod resolver;
mod scope;

pub use error::{FormatError, compute_suggestions};
pub use plural::plural_category;
pub use resolver::resolve_pattern;

use crate::parser::ast::Pattern;
use crate::types::Variables;

/// Formats patterns with runtime variables.
///
/// A non-empty error list means formatting failed and the returned string
/// must be discarded. Implementations are shared across concurrent builds
/// and must not rely on interior mutability.
pub trait PatternFormatter {
    /// Format `pattern` with `variables`.
    fn format_pattern(&self, pattern: &Pattern, variables: &Variables)
    -> (String, Vec<FormatError>);
}

use std::collections::{HashMap, HashSet};

use bon::Builder;

use crate::types::Variables;

/// Which fields render as full-width blocks instead of inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockFields {
    /// `true` makes every field a block, `false` every field inline.
    All(bool),
    /// Only the named fields are blocks.
    Named(HashSet<String>),
}

impl BlockFields {
    /// Whether `field` renders inline under this policy.
    pub fn is_inline(&self, field: &str) -> bool {
        match self {
            BlockFields::All(block) => !block,
            BlockFields::Named(names) => !names.contains(field),
        }
    }
}

impl Default for BlockFields {
    fn default() -> Self {
        BlockFields::All(false)
    }
}

impl From<bool> for BlockFields {
    fn from(block: bool) -> Self {
        BlockFields::All(block)
    }
}

impl From<HashSet<String>> for BlockFields {
    fn from(names: HashSet<String>) -> Self {
        BlockFields::Named(names)
    }
}

impl<const N: usize> From<[&str; N]> for BlockFields {
    fn from(names: [&str; N]) -> Self {
        BlockFields::Named(names.into_iter().map(str::to_string).collect())
    }
}

/// Inputs for one message build besides the message id.
///
/// # Example
///
/// ```
/// use herald::{BuildOptions, vars};
///
/// let options = BuildOptions::builder()
///     .variables(vars! { "amount" => 42 })
///     .droppable_fields(["bonus".to_string()].into())
///     .field_ordering(vec!["damage".to_string(), "bonus".to_string()])
///     .block_fields(["damage"])
///     .build();
/// assert!(!options.block_fields.is_inline("damage"));
/// assert!(options.block_fields.is_inline("bonus"));
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct BuildOptions {
    /// Variables passed to every formatted pattern.
    #[builder(default)]
    pub variables: Variables,

    /// Pre-resolved field values, used verbatim instead of the catalog's
    /// `field-<name>-value` pattern. Empty strings are ignored.
    #[builder(default)]
    pub field_values: HashMap<String, String>,

    /// Fields that are omitted instead of failing when unresolved.
    #[builder(default)]
    pub droppable_fields: HashSet<String>,

    /// Fields excluded from discovery.
    #[builder(default)]
    pub ignored_fields: HashSet<String>,

    /// Display order. When non-empty it must list every discovered field.
    #[builder(default)]
    pub field_ordering: Vec<String>,

    #[builder(default, into)]
    pub block_fields: BlockFields,
}

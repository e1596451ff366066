//! Message registry for storing and looking up templates.

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::parser::ast::Template;

/// Templates indexed by message id.
#[derive(Debug, Clone, Default)]
pub struct MessageRegistry {
    templates: HashMap<String, Template>,
}

impl MessageRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a template by message id.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.get(id)
    }

    /// Insert a template.
    ///
    /// Returns `false` and leaves the registry unchanged if a template with
    /// the same id is already registered.
    pub fn insert(&mut self, template: Template) -> bool {
        if self.templates.contains_key(&template.id) {
            return false;
        }
        self.templates.insert(template.id.clone(), template);
        true
    }

    /// Iterate over all registered message ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Catalog for MessageRegistry {
    fn lookup(&self, message_id: &str) -> Option<&Template> {
        self.get(message_id)
    }
}

impl FromIterator<Template> for MessageRegistry {
    /// Collect templates; later duplicates are ignored.
    fn from_iter<T: IntoIterator<Item = Template>>(iter: T) -> Self {
        let mut registry = MessageRegistry::new();
        for template in iter {
            registry.insert(template);
        }
        registry
    }
}

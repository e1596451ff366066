//! Public AST types for catalog messages and patterns.
//!
//! These types are public so fixture catalogs and external tooling can
//! construct or inspect templates without going through the text format.

use crate::types::Value;

/// A catalog message: an optional main pattern plus named attributes.
///
/// Attributes keep their declaration order, which is the order field
/// discovery walks them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: String,
    pub value: Option<Pattern>,
    pub attributes: Vec<Attribute>,
}

impl Template {
    /// Create a template with no value and no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: None,
            attributes: Vec::new(),
        }
    }

    /// Set the main pattern.
    pub fn with_value(mut self, value: Pattern) -> Self {
        self.value = Some(value);
        self
    }

    /// Append an attribute.
    pub fn with_attribute(mut self, id: impl Into<String>, value: Pattern) -> Self {
        self.attributes.push(Attribute {
            id: id.into(),
            value,
        });
        self
    }

    /// Look up an attribute pattern by key.
    pub fn attribute(&self, key: &str) -> Option<&Pattern> {
        self.attributes
            .iter()
            .find(|attribute| attribute.id == key)
            .map(|attribute| &attribute.value)
    }

    /// Attribute keys in declaration order.
    pub fn attribute_keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|attribute| attribute.id.as_str())
    }
}

/// A named sub-pattern of a template: `.key = pattern`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: String,
    pub value: Pattern,
}

/// A parsed pattern containing text and placeables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
}

impl Pattern {
    /// A pattern consisting of a single text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            elements: vec![PatternElement::Text(text.into())],
        }
    }
}

/// An element within a pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternElement {
    /// Literal text.
    Text(String),
    /// A placeable: `{ expression }`.
    Placeable(Expression),
}

/// The contents of a placeable.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A single inline expression: `{ $name }`.
    Inline(InlineExpression),
    /// A select expression: `{ $count -> [one] ... *[other] ... }`.
    Select {
        selector: InlineExpression,
        variants: Vec<Variant>,
    },
}

/// An expression that resolves to a single value.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineExpression {
    /// A quoted string literal: `"text"`.
    StringLiteral(String),
    /// A number literal: `42`, `-1.5`.
    NumberLiteral(Value),
    /// A variable reference: `$name`.
    Variable(String),
    /// A reference to another message or one of its attributes:
    /// `other-message` or `other-message.attribute`.
    MessageReference {
        id: String,
        attribute: Option<String>,
    },
}

impl InlineExpression {
    /// Text written to the output in place of an expression that failed to
    /// resolve.
    pub fn placeholder(&self) -> String {
        match self {
            InlineExpression::StringLiteral(s) => s.clone(),
            InlineExpression::NumberLiteral(n) => n.to_string(),
            InlineExpression::Variable(name) => format!("{{${name}}}"),
            InlineExpression::MessageReference {
                id,
                attribute: Some(attribute),
            } => format!("{{{id}.{attribute}}}"),
            InlineExpression::MessageReference {
                id,
                attribute: None,
            } => format!("{{{id}}}"),
        }
    }
}

/// One arm of a select expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub key: VariantKey,
    pub value: Pattern,
    /// Marked with `*`; chosen when no other key matches.
    pub default: bool,
}

/// The key of a select variant: `[one]` or `[0]`.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantKey {
    Identifier(String),
    Number(f64),
}

//! Pattern resolution against variables and a catalog.
//!
//! Message references resolve through the catalog with the caller's
//! variables. Select expressions choose a variant by exact number, then by
//! CLDR plural category, then by string key, then the default variant.

use crate::catalog::Catalog;
use crate::format::FormatError;
use crate::format::error::compute_suggestions;
use crate::format::plural::category_for_value;
use crate::format::scope::Scope;
use crate::parser::ast::{
    Expression, InlineExpression, Pattern, PatternElement, Variant, VariantKey,
};
use crate::types::{Value, Variables};

/// Format `pattern` with `variables`, resolving message references through
/// `catalog` and plural rules for `language`.
///
/// Returns the formatted text and every error encountered. Failed
/// placeables are written as placeholders, so the text is only meaningful
/// when the error list is empty.
pub fn resolve_pattern<C: Catalog + ?Sized>(
    pattern: &Pattern,
    variables: &Variables,
    catalog: &C,
    language: &str,
) -> (String, Vec<FormatError>) {
    let mut scope = Scope::new(variables);
    let mut output = String::new();
    write_pattern(pattern, &mut scope, catalog, language, &mut output);
    (output, scope.into_errors())
}

fn write_pattern<C: Catalog + ?Sized>(
    pattern: &Pattern,
    scope: &mut Scope<'_>,
    catalog: &C,
    lang: &str,
    output: &mut String,
) {
    for element in &pattern.elements {
        match element {
            PatternElement::Text(text) => output.push_str(text),
            PatternElement::Placeable(expression) => {
                write_expression(expression, scope, catalog, lang, output);
            }
        }
    }
}

fn write_expression<C: Catalog + ?Sized>(
    expression: &Expression,
    scope: &mut Scope<'_>,
    catalog: &C,
    lang: &str,
    output: &mut String,
) {
    match expression {
        Expression::Inline(inline) => match resolve_inline(inline, scope, catalog, lang) {
            Some(value) => output.push_str(&value.to_string()),
            None => output.push_str(&inline.placeholder()),
        },
        Expression::Select { selector, variants } => {
            let value = resolve_inline(selector, scope, catalog, lang);
            if let Some(variant) = select_variant(value.as_ref(), variants, lang) {
                write_pattern(&variant.value, scope, catalog, lang, output);
            }
        }
    }
}

/// Resolve an inline expression to a value, recording an error and
/// returning `None` on failure.
fn resolve_inline<C: Catalog + ?Sized>(
    expression: &InlineExpression,
    scope: &mut Scope<'_>,
    catalog: &C,
    lang: &str,
) -> Option<Value> {
    match expression {
        InlineExpression::StringLiteral(s) => Some(Value::String(s.clone())),
        InlineExpression::NumberLiteral(n) => Some(n.clone()),
        InlineExpression::Variable(name) => {
            if let Some(value) = scope.variable(name) {
                return Some(value.clone());
            }
            let suggestions = compute_suggestions(name, scope.variable_names());
            scope.add_error(FormatError::UnknownVariable {
                name: name.clone(),
                suggestions,
            });
            None
        }
        InlineExpression::MessageReference { id, attribute } => {
            resolve_reference(id, attribute.as_deref(), scope, catalog, lang).map(Value::String)
        }
    }
}

fn resolve_reference<C: Catalog + ?Sized>(
    id: &str,
    attribute: Option<&str>,
    scope: &mut Scope<'_>,
    catalog: &C,
    lang: &str,
) -> Option<String> {
    let Some(template) = catalog.lookup(id) else {
        scope.add_error(FormatError::UnknownMessage { id: id.to_string() });
        return None;
    };

    let pattern = match attribute {
        Some(attribute) => template.attribute(attribute),
        None => template.value.as_ref(),
    };
    let Some(pattern) = pattern else {
        scope.add_error(missing_pattern(id, attribute));
        return None;
    };

    let key = match attribute {
        Some(attribute) => format!("{id}.{attribute}"),
        None => id.to_string(),
    };
    if let Err(error) = scope.push_call(&key) {
        scope.add_error(error);
        return None;
    }
    let mut text = String::new();
    write_pattern(pattern, scope, catalog, lang, &mut text);
    scope.pop_call();
    Some(text)
}

fn missing_pattern(id: &str, attribute: Option<&str>) -> FormatError {
    match attribute {
        Some(attribute) => FormatError::UnknownAttribute {
            id: id.to_string(),
            attribute: attribute.to_string(),
        },
        None => FormatError::NoValue { id: id.to_string() },
    }
}

/// Choose the variant for a selector value.
///
/// An unresolved selector (`None`) selects the default variant.
fn select_variant<'v>(
    selector: Option<&Value>,
    variants: &'v [Variant],
    lang: &str,
) -> Option<&'v Variant> {
    let matched = selector.and_then(|value| match value {
        Value::Number(_) | Value::Float(_) => {
            let n = value.as_float();
            variants
                .iter()
                .find(|v| matches!(v.key, VariantKey::Number(k) if Some(k) == n))
                .or_else(|| {
                    let category = category_for_value(lang, value)?;
                    find_identifier(variants, category)
                })
        }
        Value::String(s) => find_identifier(variants, s),
    });
    matched
        .or_else(|| variants.iter().find(|v| v.default))
        .or_else(|| variants.last())
}

fn find_identifier<'v>(variants: &'v [Variant], key: &str) -> Option<&'v Variant> {
    variants
        .iter()
        .find(|v| matches!(&v.key, VariantKey::Identifier(k) if k == key))
}

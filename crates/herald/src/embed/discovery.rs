use std::collections::HashSet;

use super::error::BuildError;
use super::field_key::FieldKey;
use crate::parser::ast::Template;

/// Collect the field names a template declares, in display order.
///
/// Fields appear in the order their first attribute is declared, minus
/// `ignored`. A non-empty `ordering` then sorts them by position; a
/// discovered field the ordering does not list is an error.
pub fn discover_fields(
    template: &Template,
    ignored: &HashSet<String>,
    ordering: &[String],
) -> Result<Vec<String>, BuildError> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for key in template.attribute_keys() {
        let Some(field) = FieldKey::parse(key) else {
            continue;
        };
        if ignored.contains(field.name) || !seen.insert(field.name) {
            continue;
        }
        names.push(field.name);
    }

    if ordering.is_empty() {
        return Ok(names.into_iter().map(str::to_string).collect());
    }

    let mut ranked = Vec::with_capacity(names.len());
    for name in names {
        let Some(rank) = ordering.iter().position(|entry| entry == name) else {
            return Err(BuildError::OrderingMiss {
                message_id: template.id.clone(),
                field: name.to_string(),
            });
        };
        ranked.push((rank, name));
    }
    ranked.sort_by_key(|(rank, _)| *rank);
    Ok(ranked
        .into_iter()
        .map(|(_, name)| name.to_string())
        .collect())
}

use super::error::BuildError;
use super::field_key::{FieldFacet, FieldKey};
use super::message::EmbedField;
use super::options::BuildOptions;
use crate::format::{FormatError, PatternFormatter};
use crate::parser::ast::Template;

/// Resolve one field's name and value.
///
/// Returns `Ok(Some(_))` for a complete field, `Ok(None)` when the field is
/// incomplete but droppable, and an error when it is incomplete and
/// required. A non-empty `field_values` entry replaces the catalog value
/// verbatim; the name always comes from the catalog.
pub fn resolve_field<F: PatternFormatter + ?Sized>(
    template: &Template,
    field: &str,
    options: &BuildOptions,
    formatter: &F,
) -> Result<Option<EmbedField>, BuildError> {
    let mut errors = Vec::new();

    let name = format_facet(
        template,
        field,
        FieldFacet::Name,
        options,
        formatter,
        &mut errors,
    );
    let value = match options.field_values.get(field) {
        Some(value) if !value.is_empty() => Some(value.clone()),
        _ => format_facet(
            template,
            field,
            FieldFacet::Value,
            options,
            formatter,
            &mut errors,
        ),
    };

    match (name, value) {
        (Some(name), Some(value)) => Ok(Some(EmbedField {
            name,
            value,
            inline: options.block_fields.is_inline(field),
        })),
        _ if options.droppable_fields.contains(field) => Ok(None),
        (name, value) => {
            let missing = [
                (FieldFacet::Name, name.is_none()),
                (FieldFacet::Value, value.is_none()),
            ]
            .into_iter()
            .filter_map(|(facet, absent)| absent.then_some(facet))
            .collect();
            Err(BuildError::FieldResolution {
                message_id: template.id.clone(),
                field: field.to_string(),
                missing,
                errors,
            })
        }
    }
}

/// Format `field-<field>-<facet>`; absent keys and formatting errors both
/// resolve to `None`.
fn format_facet<F: PatternFormatter + ?Sized>(
    template: &Template,
    field: &str,
    facet: FieldFacet,
    options: &BuildOptions,
    formatter: &F,
    errors: &mut Vec<FormatError>,
) -> Option<String> {
    let pattern = template.attribute(&FieldKey::key_for(field, facet))?;
    let (text, mut format_errors) = formatter.format_pattern(pattern, &options.variables);
    if format_errors.is_empty() {
        Some(text)
    } else {
        errors.append(&mut format_errors);
        None
    }
}

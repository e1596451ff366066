use std::fmt;

use thiserror::Error;

use super::field_key::FieldFacet;
use crate::format::FormatError;

/// The assembly stage a build failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Catalog lookup.
    Init,
    /// `title`, `description`, `url` and `footer-text`.
    Passthrough,
    /// Field discovery and resolution.
    Fields,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Init => "init",
            Stage::Passthrough => "passthrough",
            Stage::Fields => "fields",
        })
    }
}

/// Why a build produced the fallback message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("message '{message_id}' not found in catalog")]
    CatalogMiss { message_id: String },

    #[error("attribute '{key}' of message '{message_id}' failed to format: {}", join_errors(.errors))]
    PassthroughFormat {
        message_id: String,
        key: String,
        errors: Vec<FormatError>,
    },

    #[error("field '{field}' of message '{message_id}' is not in the field ordering")]
    OrderingMiss { message_id: String, field: String },

    #[error(
        "field '{field}' of message '{message_id}' is missing its {}{}",
        join_facets(.missing),
        format_details(.errors)
    )]
    FieldResolution {
        message_id: String,
        field: String,
        missing: Vec<FieldFacet>,
        errors: Vec<FormatError>,
    },
}

impl BuildError {
    pub fn stage(&self) -> Stage {
        match self {
            BuildError::CatalogMiss { .. } => Stage::Init,
            BuildError::PassthroughFormat { .. } => Stage::Passthrough,
            BuildError::OrderingMiss { .. } | BuildError::FieldResolution { .. } => Stage::Fields,
        }
    }

    /// The passthrough key or field name involved, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            BuildError::CatalogMiss { .. } => None,
            BuildError::PassthroughFormat { key, .. } => Some(key),
            BuildError::OrderingMiss { field, .. } | BuildError::FieldResolution { field, .. } => {
                Some(field)
            }
        }
    }

    pub fn message_id(&self) -> &str {
        match self {
            BuildError::CatalogMiss { message_id }
            | BuildError::PassthroughFormat { message_id, .. }
            | BuildError::OrderingMiss { message_id, .. }
            | BuildError::FieldResolution { message_id, .. } => message_id,
        }
    }
}

fn join_errors(errors: &[FormatError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_facets(facets: &[FieldFacet]) -> String {
    facets
        .iter()
        .copied()
        .map(FieldFacet::as_str)
        .collect::<Vec<_>>()
        .join(" and ")
}

fn format_details(errors: &[FormatError]) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        format!(" ({})", join_errors(errors))
    }
}

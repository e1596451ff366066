//! Error types for pattern formatting.

use thiserror::Error;

/// An error recorded while formatting a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A `$variable` was not supplied.
    #[error("unknown variable '${name}'{}", did_you_mean(.suggestions))]
    UnknownVariable {
        name: String,
        suggestions: Vec<String>,
    },

    /// A referenced message is not in the catalog.
    #[error("unknown message '{id}'")]
    UnknownMessage { id: String },

    /// A referenced message has no such attribute.
    #[error("message '{id}' has no attribute '.{attribute}'")]
    UnknownAttribute { id: String, attribute: String },

    /// A message was referenced for its value but only has attributes.
    #[error("message '{id}' has no value")]
    NoValue { id: String },

    /// Message references form a cycle.
    #[error("cyclic reference detected: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// Message references nest too deeply.
    #[error("maximum reference depth exceeded")]
    MaxDepthExceeded,
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute up to three names close to `key` by edit distance, closest
/// first.
///
/// Short keys (three characters or fewer) allow a distance of one; longer
/// keys allow two.
pub fn compute_suggestions<'a>(
    key: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &str)> = available
        .into_iter()
        .filter(|candidate| *candidate != key)
        .map(|candidate| (strsim::levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_unstable();
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

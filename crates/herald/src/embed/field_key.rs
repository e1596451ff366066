use std::fmt;

/// Which half of a field an attribute provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFacet {
    Name,
    Value,
}

impl FieldFacet {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldFacet::Name => "name",
            FieldFacet::Value => "value",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "name" => Some(FieldFacet::Name),
            "value" => Some(FieldFacet::Value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded `field-<name>-<facet>` attribute key.
///
/// The name is everything between the first and the last `-`, so
/// `field-hit-points-value` names the field `hit-points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey<'a> {
    pub name: &'a str,
    pub facet: FieldFacet,
}

const FIELD_PREFIX: &str = "field-";

impl<'a> FieldKey<'a> {
    /// Decode an attribute key, or `None` if it does not follow the field
    /// naming convention.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald::{FieldFacet, FieldKey};
    ///
    /// let key = FieldKey::parse("field-damage-value").unwrap();
    /// assert_eq!(key.name, "damage");
    /// assert_eq!(key.facet, FieldFacet::Value);
    ///
    /// assert_eq!(FieldKey::parse("title"), None);
    /// assert_eq!(FieldKey::parse("field-damage-color"), None);
    /// ```
    pub fn parse(key: &'a str) -> Option<Self> {
        let rest = key.strip_prefix(FIELD_PREFIX)?;
        let (name, suffix) = rest.rsplit_once('-')?;
        if name.is_empty() {
            return None;
        }
        let facet = FieldFacet::from_suffix(suffix)?;
        Some(FieldKey { name, facet })
    }

    /// The attribute key this field key was decoded from.
    pub fn attribute_key(&self) -> String {
        Self::key_for(self.name, self.facet)
    }

    pub(crate) fn key_for(name: &str, facet: FieldFacet) -> String {
        format!("{FIELD_PREFIX}{name}-{facet}")
    }
}

use serde::Serialize;

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const RED: Color = Color(0xE7_4C_3C);
}

/// One resolved field of a structured message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A fully resolved structured message.
///
/// Absent properties are skipped when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    pub fields: Vec<EmbedField>,
}

impl StructuredMessage {
    /// The generic error message: red, titled, and nothing else.
    pub fn fallback(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            color: Some(Color::RED),
            ..Self::default()
        }
    }

    /// Set a passthrough property by its attribute key.
    pub(crate) fn set_passthrough(&mut self, key: &str, value: String) {
        let slot = match key {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "url" => &mut self.url,
            "footer-text" => &mut self.footer_text,
            _ => return,
        };
        *slot = Some(value);
    }
}

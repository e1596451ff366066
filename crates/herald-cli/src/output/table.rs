//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use herald::StructuredMessage;

/// Coverage data for a single language.
pub struct LanguageCoverage {
    /// Language code (e.g., "es", "fr").
    pub language: String,
    /// Number of source messages translated.
    pub translated: usize,
    /// Ids of missing messages.
    pub missing: Vec<String>,
    /// Validation warnings against the source catalog.
    pub warnings: Vec<String>,
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LanguageCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Coverage", "Missing", "Warnings"]);

    for lang in coverage {
        table.add_row(vec![
            lang.language.clone(),
            format!("{}/{}", lang.translated, source_count),
            lang.missing.len().to_string(),
            lang.warnings.len().to_string(),
        ]);
    }

    table
}

/// Format a structured message's properties and fields as a table.
pub fn format_message_table(message: &StructuredMessage) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Property", "Value", "Layout"]);

    let properties = [
        ("title", &message.title),
        ("description", &message.description),
        ("url", &message.url),
        ("footer", &message.footer_text),
    ];
    for (label, value) in properties {
        if let Some(value) = value {
            table.add_row(vec![label.to_string(), value.clone(), String::new()]);
        }
    }
    if let Some(color) = message.color {
        table.add_row(vec![
            "color".to_string(),
            format!("#{:06X}", color.0),
            String::new(),
        ]);
    }
    for field in &message.fields {
        let layout = if field.inline { "inline" } else { "block" };
        table.add_row(vec![field.name.clone(), field.value.clone(), layout.to_string()]);
    }

    table
}

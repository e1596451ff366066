//! Miette diagnostic wrapper for catalog syntax errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use herald::parser::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for catalog syntax errors.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(herald::syntax))]
pub struct HeraldDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,
}

impl HeraldDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let (line, column, message) = match err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => (*line, *column, message.clone()),
            ParseError::UnexpectedEof { line, column } => {
                (*line, *column, "unexpected end of file".into())
            }
        };
        Self::from_position(path, content, line, column, message)
    }

    /// Create a diagnostic pointing at a 1-based line and column.
    pub fn from_position(
        path: &Path,
        content: &str,
        line: usize,
        column: usize,
        message: String,
    ) -> Self {
        // Sum of (line_length + 1) for lines before the error line
        let line_start = content
            .split('\n')
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            .min(content.len());

        // Columns count characters; clamp to avoid a miette panic on
        // out-of-bounds spans
        let offset = content[line_start..]
            .char_indices()
            .nth(column.saturating_sub(1))
            .map_or(content.len(), |(index, _)| line_start + index);

        HeraldDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message,
        }
    }
}

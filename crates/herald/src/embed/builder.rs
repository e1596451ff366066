use tracing::{debug, error};

use super::discovery::discover_fields;
use super::error::BuildError;
use super::message::StructuredMessage;
use super::options::BuildOptions;
use super::resolver::resolve_field;
use crate::catalog::Catalog;
use crate::format::PatternFormatter;
use crate::parser::ast::Template;
use crate::types::Variables;

/// Attribute keys copied onto the message's top-level properties.
const PASSTHROUGH_KEYS: [&str; 4] = ["title", "description", "url", "footer-text"];

/// Catalog message whose value titles the fallback message.
const ERROR_MESSAGE_ID: &str = "localization-error";

/// Fallback title when the catalog has no usable `localization-error`.
const FALLBACK_TITLE: &str = "Localization error";

/// The outcome of a build before it is collapsed into a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Success(StructuredMessage),
    Fallback(BuildError),
}

/// Builds structured messages from an injected catalog and formatter.
///
/// Holds only shared references, so one builder can serve many threads when
/// the catalog and formatter are `Sync`.
#[derive(Debug)]
pub struct MessageBuilder<'a, C: Catalog + ?Sized, F: PatternFormatter + ?Sized> {
    catalog: &'a C,
    formatter: &'a F,
}

impl<C: Catalog + ?Sized, F: PatternFormatter + ?Sized> Clone for MessageBuilder<'_, C, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Catalog + ?Sized, F: PatternFormatter + ?Sized> Copy for MessageBuilder<'_, C, F> {}

impl<'a, C: Catalog + ?Sized, F: PatternFormatter + ?Sized> MessageBuilder<'a, C, F> {
    pub fn new(catalog: &'a C, formatter: &'a F) -> Self {
        Self { catalog, formatter }
    }

    /// Build the message for `message_id`, or the fallback message if any
    /// stage fails.
    ///
    /// Failures are reported through a `tracing` error event carrying the
    /// message id, stage and field.
    pub fn build(&self, message_id: &str, options: &BuildOptions) -> StructuredMessage {
        match self.resolve(message_id, options) {
            Resolution::Success(message) => message,
            Resolution::Fallback(err) => {
                error!(
                    message_id,
                    stage = %err.stage(),
                    field = err.field(),
                    error = %err,
                    "structured message fell back"
                );
                self.fallback()
            }
        }
    }

    /// Run every stage and report how the build ended.
    pub fn resolve(&self, message_id: &str, options: &BuildOptions) -> Resolution {
        match self.try_resolve(message_id, options) {
            Ok(message) => {
                debug!(
                    message_id,
                    fields = message.fields.len(),
                    "built structured message"
                );
                Resolution::Success(message)
            }
            Err(err) => Resolution::Fallback(err),
        }
    }

    /// The fallback message, titled from the catalog when possible.
    pub fn fallback(&self) -> StructuredMessage {
        StructuredMessage::fallback(self.fallback_title())
    }

    fn try_resolve(
        &self,
        message_id: &str,
        options: &BuildOptions,
    ) -> Result<StructuredMessage, BuildError> {
        let template = self
            .catalog
            .lookup(message_id)
            .ok_or_else(|| BuildError::CatalogMiss {
                message_id: message_id.to_string(),
            })?;

        let mut message = StructuredMessage::default();
        self.resolve_passthrough(template, options, &mut message)?;

        let names = discover_fields(template, &options.ignored_fields, &options.field_ordering)?;
        for name in &names {
            if let Some(field) = resolve_field(template, name, options, self.formatter)? {
                message.fields.push(field);
            }
        }
        Ok(message)
    }

    fn resolve_passthrough(
        &self,
        template: &Template,
        options: &BuildOptions,
        message: &mut StructuredMessage,
    ) -> Result<(), BuildError> {
        for key in PASSTHROUGH_KEYS {
            let Some(pattern) = template.attribute(key) else {
                continue;
            };
            let (text, errors) = self.formatter.format_pattern(pattern, &options.variables);
            if !errors.is_empty() {
                return Err(BuildError::PassthroughFormat {
                    message_id: template.id.clone(),
                    key: key.to_string(),
                    errors,
                });
            }
            message.set_passthrough(key, text);
        }
        Ok(())
    }

    fn fallback_title(&self) -> String {
        self.catalog
            .lookup(ERROR_MESSAGE_ID)
            .and_then(|template| template.value.as_ref())
            .and_then(|pattern| {
                let (text, errors) = self.formatter.format_pattern(pattern, &Variables::new());
                errors.is_empty().then_some(text)
            })
            .unwrap_or_else(|| FALLBACK_TITLE.to_string())
    }
}

//! Single-language catalogs loaded from resource text.
//!
//! A [`Bundle`] owns the templates of one language and doubles as the
//! pattern formatter for them, so message references inside patterns
//! resolve against the same catalog.

use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use tracing::debug;

use crate::catalog::Catalog;
use crate::catalog::error::{LoadError, LoadWarning};
use crate::catalog::registry::MessageRegistry;
use crate::embed::MessageBuilder;
use crate::format::{FormatError, PatternFormatter, resolve_pattern};
use crate::parser::ast::{Pattern, Template};
use crate::parser::{ParseError, parse_resource};
use crate::types::Variables;

/// A catalog of message templates for one language.
///
/// Loading always **replaces** the previous contents. A resource that fails
/// to load leaves the bundle unchanged.
///
/// # Example
///
/// ```
/// use herald::{Bundle, BuildOptions, vars};
///
/// let mut bundle = Bundle::builder().language("en").build();
/// bundle
///     .load_resource_str(
///         "battle-result =\n    .title = Battle won!\n    .field-damage-name = Damage\n    .field-damage-value = { $amount }\n",
///     )
///     .unwrap();
///
/// let options = BuildOptions::builder().variables(vars! { "amount" => 42 }).build();
/// let message = bundle.message_builder().build("battle-result", &options);
/// assert_eq!(message.title.as_deref(), Some("Battle won!"));
/// assert_eq!(message.fields[0].value, "42");
/// ```
#[derive(Debug, Builder)]
#[builder(on(String, into))]
pub struct Bundle {
    /// Language code used for plural rules (e.g., "en", "ru", "pt-BR").
    #[builder(default = "en".to_string())]
    language: String,

    #[builder(skip)]
    registry: MessageRegistry,

    /// File path for reload support. Only set for file-loaded bundles.
    #[builder(skip)]
    loaded_path: Option<PathBuf>,
}

impl Default for Bundle {
    fn default() -> Self {
        Bundle::builder().build()
    }
}

impl Bundle {
    /// Create an empty English bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bundle for the specified language.
    pub fn with_language(language: impl Into<String>) -> Self {
        Bundle::builder().language(language.into()).build()
    }

    /// Get the language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get the underlying registry (read-only).
    pub fn registry(&self) -> &MessageRegistry {
        &self.registry
    }

    /// Get a template by message id.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.registry.get(id)
    }

    /// All message ids, sorted.
    pub fn message_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.registry.ids().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of loaded messages.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether no messages are loaded.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// A message builder reading templates from this bundle and formatting
    /// them with it.
    pub fn message_builder(&self) -> MessageBuilder<'_, Bundle, Bundle> {
        MessageBuilder::new(self, self)
    }

    /// Load a resource file, replacing all current messages.
    ///
    /// The path is stored for later [`Bundle::reload`] calls.
    pub fn load_resource(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let count = self.replace_from_str(&content, Some(path))?;
        self.loaded_path = Some(path.to_path_buf());
        Ok(count)
    }

    /// Load resource text, replacing all current messages.
    ///
    /// Bundles loaded this way cannot be reloaded.
    ///
    /// # Example
    ///
    /// ```
    /// use herald::Bundle;
    ///
    /// let mut bundle = Bundle::new();
    /// let count = bundle.load_resource_str("hello = Hello!\nbye = Goodbye!\n").unwrap();
    /// assert_eq!(count, 2);
    /// ```
    pub fn load_resource_str(&mut self, content: &str) -> Result<usize, LoadError> {
        let count = self.replace_from_str(content, None)?;
        self.loaded_path = None;
        Ok(count)
    }

    /// Re-read the resource file this bundle was loaded from.
    pub fn reload(&mut self) -> Result<usize, LoadError> {
        let path = self
            .loaded_path
            .clone()
            .ok_or_else(|| LoadError::NoPathForReload {
                language: self.language.clone(),
            })?;
        self.load_resource(path)
    }

    /// Validate this bundle (a translation) against a source bundle.
    ///
    /// Reports messages the source does not define and attributes the
    /// source message lacks. Warnings are sorted by message id.
    pub fn validate_against(&self, source: &Bundle) -> Vec<LoadWarning> {
        let mut warnings = Vec::new();

        for id in self.message_ids() {
            let Some(source_template) = source.get(id) else {
                warnings.push(LoadWarning::UnknownMessage {
                    id: id.to_string(),
                    language: self.language.clone(),
                });
                continue;
            };
            let Some(template) = self.get(id) else {
                continue;
            };
            for key in template.attribute_keys() {
                if source_template.attribute(key).is_none() {
                    warnings.push(LoadWarning::UnknownAttribute {
                        id: id.to_string(),
                        attribute: key.to_string(),
                        language: self.language.clone(),
                    });
                }
            }
        }

        warnings
    }

    /// Parse `content` into a fresh registry and swap it in on success.
    fn replace_from_str(&mut self, content: &str, path: Option<&Path>) -> Result<usize, LoadError> {
        let display_path = || {
            path.map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(format!("<{}>", self.language)))
        };

        let templates = parse_resource(content).map_err(|e| match e {
            ParseError::Syntax {
                line,
                column,
                message,
            } => LoadError::Parse {
                path: display_path(),
                line,
                column,
                message,
            },
            ParseError::UnexpectedEof { line, column } => LoadError::Parse {
                path: display_path(),
                line,
                column,
                message: "unexpected end of file".to_string(),
            },
        })?;

        let mut registry = MessageRegistry::new();
        for template in templates {
            let id = template.id.clone();
            if !registry.insert(template) {
                return Err(LoadError::DuplicateMessage {
                    path: display_path(),
                    id,
                });
            }
        }

        let count = registry.len();
        debug!(language = %self.language, messages = count, "loaded catalog resource");
        self.registry = registry;
        Ok(count)
    }
}

impl Catalog for Bundle {
    fn lookup(&self, message_id: &str) -> Option<&Template> {
        self.registry.get(message_id)
    }
}

impl PatternFormatter for Bundle {
    fn format_pattern(
        &self,
        pattern: &Pattern,
        variables: &Variables,
    ) -> (String, Vec<FormatError>) {
        resolve_pattern(pattern, variables, &self.registry, &self.language)
    }
}

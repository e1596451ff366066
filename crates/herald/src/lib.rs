pub mod catalog;
pub mod embed;
pub mod format;
pub mod parser;
pub mod types;

pub use catalog::{Bundle, Catalog, LoadError, LoadWarning, MessageRegistry};
pub use embed::{
    BlockFields, BuildError, BuildOptions, Color, EmbedField, FieldFacet, FieldKey, MessageBuilder,
    Resolution, Stage, StructuredMessage,
};
pub use format::{FormatError, PatternFormatter, plural_category};
pub use parser::{Pattern, Template};
pub use types::{Value, Variables};

/// Creates a [`Variables`] map from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats and strings
/// can be passed directly.
///
/// # Example
///
/// ```
/// use herald::{vars, Value};
///
/// let v = vars! { "amount" => 42, "target" => "Pikachu" };
/// assert_eq!(v.len(), 2);
/// assert_eq!(v["amount"].as_number(), Some(42));
/// assert_eq!(v["target"].as_string(), Some("Pikachu"));
/// ```
#[macro_export]
macro_rules! vars {
    {} => {
        $crate::Variables::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Variables::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}

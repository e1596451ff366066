//! CLDR plural category resolution for select expressions.
//!
//! Plural rules are cached per thread per language. Language tags are
//! reduced to their primary subtag (`pt-BR` uses `pt` rules) and unknown
//! languages use English rules.

use std::cell::RefCell;

use icu_locale_core::locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use crate::types::Value;

/// Languages with dedicated plural rules.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "bn", "de", "el", "en", "es", "fa", "fr", "he", "hi", "id", "it", "ja", "ko", "nl", "pl",
    "pt", "ro", "ru", "th", "tr", "uk", "vi", "zh",
];

thread_local! {
    static PLURAL_RULES_CACHE: RefCell<Vec<(&'static str, PluralRules)>> = const { RefCell::new(Vec::new()) };
}

/// Reduce a language tag to a supported primary subtag, or `"en"`.
fn normalize_lang(tag: &str) -> &'static str {
    let primary = tag.split(['-', '_']).next().unwrap_or(tag);
    SUPPORTED_LANGUAGES
        .iter()
        .find(|code| code.eq_ignore_ascii_case(primary))
        .copied()
        .unwrap_or("en")
}

fn build_rules(lang: &'static str) -> PluralRules {
    let loc = match lang {
        "ar" => locale!("ar"),
        "bn" => locale!("bn"),
        "de" => locale!("de"),
        "el" => locale!("el"),
        "es" => locale!("es"),
        "fa" => locale!("fa"),
        "fr" => locale!("fr"),
        "he" => locale!("he"),
        "hi" => locale!("hi"),
        "id" => locale!("id"),
        "it" => locale!("it"),
        "ja" => locale!("ja"),
        "ko" => locale!("ko"),
        "nl" => locale!("nl"),
        "pl" => locale!("pl"),
        "pt" => locale!("pt"),
        "ro" => locale!("ro"),
        "ru" => locale!("ru"),
        "th" => locale!("th"),
        "tr" => locale!("tr"),
        "uk" => locale!("uk"),
        "vi" => locale!("vi"),
        "zh" => locale!("zh"),
        _ => locale!("en"),
    };
    PluralRules::try_new(loc.into(), PluralRuleType::Cardinal.into())
        .expect("compiled data covers every supported language")
}

fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Get the CLDR cardinal plural category for an integer.
///
/// # Examples
///
/// ```
/// use herald::plural_category;
///
/// assert_eq!(plural_category("en", 1), "one");
/// assert_eq!(plural_category("en-GB", 2), "other");
/// assert_eq!(plural_category("ru", 3), "few");
/// assert_eq!(plural_category("ru", 5), "many");
/// ```
pub fn plural_category(lang: &str, n: i64) -> &'static str {
    let lang = normalize_lang(lang);
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some(entry) = cache.iter().find(|(code, _)| *code == lang) {
            return category_str(entry.1.category_for(n));
        }
        let rules = build_rules(lang);
        let category = category_str(rules.category_for(n));
        cache.push((lang, rules));
        category
    })
}

/// Plural category for a numeric value. Fractional numbers are `"other"`.
pub(crate) fn category_for_value(lang: &str, value: &Value) -> Option<&'static str> {
    match value {
        Value::Number(n) => Some(plural_category(lang, *n)),
        Value::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => {
            Some(plural_category(lang, *f as i64))
        }
        Value::Float(_) => Some("other"),
        Value::String(_) => None,
    }
}

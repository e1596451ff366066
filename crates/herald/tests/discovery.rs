//! Tests for field discovery and ordering.

use std::collections::HashSet;

use herald::embed::discover_fields;
use herald::{BuildError, Pattern, Template};

fn template(keys: &[&str]) -> Template {
    keys.iter().fold(Template::new("battle-result"), |template, key| {
        template.with_attribute(*key, Pattern::text("x"))
    })
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn set(values: &[&str]) -> HashSet<String> {
    values.iter().map(ToString::to_string).collect()
}

// =========================================================================
// Discovery Order
// =========================================================================

#[test]
fn discovers_fields_in_first_seen_order() {
    let template = template(&[
        "title",
        "field-damage-name",
        "field-bonus-value",
        "field-damage-value",
        "field-bonus-name",
        "field-stats-value",
    ]);
    let fields = discover_fields(&template, &HashSet::new(), &[]).unwrap();
    assert_eq!(fields, names(&["damage", "bonus", "stats"]));
}

#[test]
fn skips_foreign_and_malformed_keys() {
    let template = template(&[
        "description",
        "footer-text",
        "field-damage-color",
        "field-value",
        "fields-x-name",
        "field-hit-points-name",
    ]);
    let fields = discover_fields(&template, &HashSet::new(), &[]).unwrap();
    assert_eq!(fields, names(&["hit-points"]));
}

#[test]
fn template_without_fields_discovers_nothing() {
    let template = template(&["title", "description"]);
    let fields = discover_fields(&template, &HashSet::new(), &[]).unwrap();
    assert!(fields.is_empty());
}

#[test]
fn ignored_fields_are_excluded() {
    let template = template(&["field-damage-name", "field-bonus-name"]);
    let fields = discover_fields(&template, &set(&["damage"]), &[]).unwrap();
    assert_eq!(fields, names(&["bonus"]));
}

// =========================================================================
// Explicit Ordering
// =========================================================================

#[test]
fn ordering_sorts_discovered_fields() {
    let template = template(&["field-damage-name", "field-bonus-name", "field-stats-name"]);
    let ordering = names(&["stats", "damage", "bonus"]);
    let fields = discover_fields(&template, &HashSet::new(), &ordering).unwrap();
    assert_eq!(fields, ordering);
}

#[test]
fn ordering_may_list_undiscovered_fields() {
    let template = template(&["field-damage-name", "field-bonus-name"]);
    let ordering = names(&["missing", "bonus", "other", "damage"]);
    let fields = discover_fields(&template, &HashSet::new(), &ordering).unwrap();
    assert_eq!(fields, names(&["bonus", "damage"]));
}

#[test]
fn field_missing_from_ordering_is_an_error() {
    let template = template(&["field-damage-name", "field-bonus-name"]);
    let err = discover_fields(&template, &HashSet::new(), &names(&["damage"])).unwrap_err();
    assert_eq!(
        err,
        BuildError::OrderingMiss {
            message_id: "battle-result".to_string(),
            field: "bonus".to_string(),
        }
    );
}

#[test]
fn ignored_field_need_not_be_ordered() {
    let template = template(&["field-damage-name", "field-bonus-name"]);
    let fields = discover_fields(&template, &set(&["bonus"]), &names(&["damage"])).unwrap();
    assert_eq!(fields, names(&["damage"]));
}

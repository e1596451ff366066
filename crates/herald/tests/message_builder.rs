//! Tests for structured message assembly.

use std::collections::HashSet;
use std::thread;

use herald::{
    BlockFields, BuildError, BuildOptions, Bundle, Color, EmbedField, FieldFacet, FormatError,
    MessageBuilder, MessageRegistry, Pattern, PatternFormatter, Resolution, Stage,
    StructuredMessage, Template, Variables, vars,
};

const BATTLE: &str = "\
battle-result =
    .title = Battle won!
    .field-damage-name = Damage
    .field-damage-value = { $amount }
";

const REPORT: &str = "\
report = { $winner } won
    .title = { $winner } won the battle
    .description = Against { $loser }
    .url = https://example.com/battles/{ $id }
    .footer-text = Turn { $turn }
    .field-damage-name = Damage
    .field-damage-value = { $amount }
    .field-bonus-name = Bonus
    .field-bonus-value = +{ $bonus }
    .field-stats-name = Stats
    .field-stats-value = { $hp } HP
";

fn bundle(source: &str) -> Bundle {
    let mut bundle = Bundle::new();
    bundle.load_resource_str(source).unwrap();
    bundle
}

fn set(values: &[&str]) -> HashSet<String> {
    values.iter().map(ToString::to_string).collect()
}

fn report_variables() -> Variables {
    vars! {
        "winner" => "Ash",
        "loser" => "Gary",
        "id" => 7,
        "turn" => 12,
        "amount" => 42,
        "bonus" => 5,
        "hp" => 80,
    }
}

fn field(name: &str, value: &str, inline: bool) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value: value.to_string(),
        inline,
    }
}

fn fallback_reason(resolution: Resolution) -> BuildError {
    match resolution {
        Resolution::Fallback(err) => err,
        Resolution::Success(message) => panic!("expected fallback, got {message:?}"),
    }
}

// =========================================================================
// Successful Builds
// =========================================================================

#[test]
fn battle_result_builds_title_and_inline_field() {
    let bundle = bundle(BATTLE);
    let options = BuildOptions::builder()
        .variables(vars! { "amount" => 42 })
        .build();
    let message = bundle.message_builder().build("battle-result", &options);

    assert_eq!(
        message,
        StructuredMessage {
            title: Some("Battle won!".to_string()),
            fields: vec![field("Damage", "42", true)],
            ..StructuredMessage::default()
        }
    );
}

#[test]
fn all_passthrough_properties_are_resolved() {
    let bundle = bundle(REPORT);
    let options = BuildOptions::builder()
        .variables(report_variables())
        .build();
    let message = bundle.message_builder().build("report", &options);

    assert_eq!(message.title.as_deref(), Some("Ash won the battle"));
    assert_eq!(message.description.as_deref(), Some("Against Gary"));
    assert_eq!(
        message.url.as_deref(),
        Some("https://example.com/battles/7")
    );
    assert_eq!(message.footer_text.as_deref(), Some("Turn 12"));
    assert_eq!(message.color, None);
    assert_eq!(
        message.fields,
        vec![
            field("Damage", "42", true),
            field("Bonus", "+5", true),
            field("Stats", "80 HP", true),
        ]
    );
}

#[test]
fn absent_passthrough_keys_are_omitted() {
    let bundle = bundle("plain =\n    .field-a-name = A\n    .field-a-value = 1\n");
    let message = bundle
        .message_builder()
        .build("plain", &BuildOptions::default());
    assert_eq!(message.title, None);
    assert_eq!(message.description, None);
    assert_eq!(message.fields, vec![field("A", "1", true)]);
}

#[test]
fn field_ordering_controls_output_order() {
    let bundle = bundle(REPORT);
    let options = BuildOptions::builder()
        .variables(report_variables())
        .field_ordering(vec![
            "stats".to_string(),
            "damage".to_string(),
            "bonus".to_string(),
        ])
        .build();
    let message = bundle.message_builder().build("report", &options);
    let names: Vec<&str> = message.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Stats", "Damage", "Bonus"]);
}

#[test]
fn ignored_fields_are_never_resolved() {
    let bundle = bundle(REPORT);
    let mut variables = report_variables();
    variables.remove("bonus");
    let options = BuildOptions::builder()
        .variables(variables)
        .ignored_fields(set(&["bonus"]))
        .build();
    let message = bundle.message_builder().build("report", &options);
    let names: Vec<&str> = message.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Damage", "Stats"]);
}

#[test]
fn build_is_idempotent() {
    let bundle = bundle(REPORT);
    let builder = bundle.message_builder();
    let options = BuildOptions::builder()
        .variables(report_variables())
        .build();
    assert_eq!(
        builder.build("report", &options),
        builder.build("report", &options)
    );
}

// =========================================================================
// Droppable Fields
// =========================================================================

#[test]
fn missing_variable_without_droppable_falls_back() {
    let bundle = bundle(BATTLE);
    let message = bundle
        .message_builder()
        .build("battle-result", &BuildOptions::default());
    assert_eq!(message, StructuredMessage::fallback("Localization error"));
}

#[test]
fn missing_variable_with_droppable_omits_field() {
    let bundle = bundle(BATTLE);
    let options = BuildOptions::builder()
        .droppable_fields(set(&["damage"]))
        .build();
    let message = bundle.message_builder().build("battle-result", &options);
    assert_eq!(message.title.as_deref(), Some("Battle won!"));
    assert!(message.fields.is_empty());
}

#[test]
fn droppable_field_missing_its_name_is_omitted() {
    let bundle = bundle(
        "m =\n    .field-a-value = 1\n    .field-b-name = B\n    .field-b-value = 2\n",
    );
    let options = BuildOptions::builder()
        .droppable_fields(set(&["a"]))
        .build();
    let message = bundle.message_builder().build("m", &options);
    assert_eq!(message.fields, vec![field("B", "2", true)]);
}

#[test]
fn required_field_missing_its_name_reports_facet() {
    let bundle = bundle("m =\n    .field-a-value = 1\n");
    let builder = bundle.message_builder();
    let err = fallback_reason(builder.resolve("m", &BuildOptions::default()));
    assert_eq!(
        err,
        BuildError::FieldResolution {
            message_id: "m".to_string(),
            field: "a".to_string(),
            missing: vec![FieldFacet::Name],
            errors: vec![],
        }
    );
}

// =========================================================================
// Field Value Overrides
// =========================================================================

#[test]
fn override_replaces_catalog_value_verbatim() {
    let bundle = bundle(BATTLE);
    let options = BuildOptions::builder()
        .field_values([("damage".to_string(), "{ $amount } x2".to_string())].into())
        .build();
    let message = bundle.message_builder().build("battle-result", &options);
    assert_eq!(
        message.fields,
        vec![field("Damage", "{ $amount } x2", true)]
    );
}

#[test]
fn override_supplies_value_without_catalog_pattern() {
    let bundle = bundle("m =\n    .field-rank-name = Rank\n");
    let options = BuildOptions::builder()
        .field_values([("rank".to_string(), "Gold".to_string())].into())
        .build();
    let message = bundle.message_builder().build("m", &options);
    assert_eq!(message.fields, vec![field("Rank", "Gold", true)]);
}

#[test]
fn empty_override_uses_catalog_value() {
    let bundle = bundle(BATTLE);
    let options = BuildOptions::builder()
        .variables(vars! { "amount" => 3 })
        .field_values([("damage".to_string(), String::new())].into())
        .build();
    let message = bundle.message_builder().build("battle-result", &options);
    assert_eq!(message.fields, vec![field("Damage", "3", true)]);
}

#[test]
fn override_does_not_replace_the_name() {
    let bundle = bundle("m =\n    .field-a-value = 1\n");
    let options = BuildOptions::builder()
        .field_values([("a".to_string(), "override".to_string())].into())
        .build();
    let err = fallback_reason(bundle.message_builder().resolve("m", &options));
    assert_eq!(err.field(), Some("a"));
}

// =========================================================================
// Block Fields
// =========================================================================

#[test]
fn block_all_makes_every_field_block() {
    let bundle = bundle(REPORT);
    let options = BuildOptions::builder()
        .variables(report_variables())
        .block_fields(true)
        .build();
    let message = bundle.message_builder().build("report", &options);
    assert_eq!(message.fields.len(), 3);
    assert!(message.fields.iter().all(|f| !f.inline));
}

#[test]
fn named_block_fields_only_affect_those_fields() {
    let bundle = bundle(REPORT);
    let options = BuildOptions::builder()
        .variables(report_variables())
        .block_fields(["stats"])
        .build();
    let message = bundle.message_builder().build("report", &options);
    let layout: Vec<(&str, bool)> = message
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.inline))
        .collect();
    assert_eq!(
        layout,
        vec![("Damage", true), ("Bonus", true), ("Stats", false)]
    );
}

#[test]
fn block_fields_policy() {
    assert!(BlockFields::default().is_inline("any"));
    assert!(!BlockFields::All(true).is_inline("any"));
    let named = BlockFields::from(set(&["stats"]));
    assert!(!named.is_inline("stats"));
    assert!(named.is_inline("damage"));
}

// =========================================================================
// Fallback Reasons
// =========================================================================

#[test]
fn unknown_message_is_a_catalog_miss() {
    let bundle = bundle(BATTLE);
    let builder = bundle.message_builder();
    let err = fallback_reason(builder.resolve("nope", &BuildOptions::default()));
    assert_eq!(err.stage(), Stage::Init);
    assert_eq!(err.field(), None);
    insta::assert_snapshot!(err.to_string(), @"message 'nope' not found in catalog");
    assert_eq!(
        builder.build("nope", &BuildOptions::default()),
        StructuredMessage::fallback("Localization error")
    );
}

#[test]
fn failing_passthrough_falls_back() {
    let bundle = bundle(REPORT);
    let mut variables = report_variables();
    variables.remove("loser");
    let options = BuildOptions::builder().variables(variables).build();
    let err = fallback_reason(bundle.message_builder().resolve("report", &options));
    assert_eq!(err.stage(), Stage::Passthrough);
    assert_eq!(err.field(), Some("description"));
    insta::assert_snapshot!(err.to_string(), @"attribute 'description' of message 'report' failed to format: unknown variable '$loser'");
}

#[test]
fn ordering_miss_falls_back() {
    let bundle = bundle(REPORT);
    let options = BuildOptions::builder()
        .variables(report_variables())
        .field_ordering(vec!["damage".to_string(), "bonus".to_string()])
        .build();
    let builder = bundle.message_builder();
    let err = fallback_reason(builder.resolve("report", &options));
    assert_eq!(err.stage(), Stage::Fields);
    assert_eq!(err.field(), Some("stats"));
    assert_eq!(
        builder.build("report", &options),
        StructuredMessage::fallback("Localization error")
    );
}

#[test]
fn unresolved_required_field_reports_format_errors() {
    let bundle = bundle(BATTLE);
    let err = fallback_reason(
        bundle
            .message_builder()
            .resolve("battle-result", &BuildOptions::default()),
    );
    assert_eq!(err.stage(), Stage::Fields);
    insta::assert_snapshot!(err.to_string(), @"field 'damage' of message 'battle-result' is missing its value (unknown variable '$amount')");
}

#[test]
fn fallback_title_comes_from_catalog() {
    let bundle = bundle(&format!("{BATTLE}localization-error = Something went wrong\n"));
    let message = bundle
        .message_builder()
        .build("battle-result", &BuildOptions::default());
    assert_eq!(message.title.as_deref(), Some("Something went wrong"));
    assert_eq!(message.color, Some(Color::RED));
    assert!(message.fields.is_empty());
    assert_eq!(message.description, None);
}

#[test]
fn fallback_serializes_without_absent_properties() {
    let message = StructuredMessage::fallback("Localization error");
    insta::assert_snapshot!(
        serde_json::to_string(&message).unwrap(),
        @r#"{"title":"Localization error","color":15158332,"fields":[]}"#
    );
}

// =========================================================================
// Injected Collaborators
// =========================================================================

/// Formatter that fails every pattern.
struct FailingFormatter;

impl PatternFormatter for FailingFormatter {
    fn format_pattern(&self, _: &Pattern, _: &Variables) -> (String, Vec<FormatError>) {
        ("partial".to_string(), vec![FormatError::MaxDepthExceeded])
    }
}

#[test]
fn formatter_errors_discard_partial_output() {
    let bundle = bundle(&format!("{BATTLE}localization-error = Oops\n"));
    let builder = MessageBuilder::new(&bundle, &FailingFormatter);
    let err = fallback_reason(builder.resolve("battle-result", &BuildOptions::default()));
    assert_eq!(err.field(), Some("title"));
    // The fallback title also goes through the failing formatter
    assert_eq!(
        builder.build("battle-result", &BuildOptions::default()),
        StructuredMessage::fallback("Localization error")
    );
}

#[test]
fn fixture_registry_as_catalog() {
    let registry: MessageRegistry = [Template::new("greet")
        .with_attribute("title", Pattern::text("Hello"))
        .with_attribute("field-who-name", Pattern::text("Who"))
        .with_attribute("field-who-value", Pattern::text("World"))]
    .into_iter()
    .collect();
    let formatter = Bundle::new();
    let message =
        MessageBuilder::new(&registry, &formatter).build("greet", &BuildOptions::default());
    assert_eq!(message.title.as_deref(), Some("Hello"));
    assert_eq!(message.fields, vec![field("Who", "World", true)]);
}

#[test]
fn concurrent_builds_share_one_bundle() {
    let bundle = bundle(REPORT);
    let builder = bundle.message_builder();
    let options = BuildOptions::builder()
        .variables(report_variables())
        .build();
    let options = &options;
    let expected = builder.build("report", options);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(move |_| scope.spawn(move || builder.build("report", options)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

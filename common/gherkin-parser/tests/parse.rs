//! Integration tests for gherkin-parser

use gherkin_model::{StepKeywordType, TextPosition, TAG_MARKER};
use gherkin_parser::GherkinParser;
use pretty_assertions::assert_eq;

const URI: &str = "file:///work/shop.feature";

fn parse(text: &str) -> gherkin_model::FeatureFile {
    GherkinParser::new().parse_str(URI, text)
}

const SHOP: &str = r#"# language: en
@checkout @smoke
Feature: Checkout
  Buying things online.
  Second description line.

  Background:
    Given a catalogue

  # scenario comment
  Scenario: Pay by card
    Given a basket with 2 items
    When the customer pays
      | card  | amount |
      | visa  | 10     |
    Then a receipt is shown
      """json
      {"total": 10}
      """

  @outline
  Scenario Outline: Discounts
    Given a code <code>
    * the price is <price>
    But nothing else

    @first
    Examples: Codes
      | code | price |
      | A    | 5     |

  Rule: Refunds
    Background:
      Given a paid order

    Example: Full refund
      When the order is refunded
      Then money is returned
"#;

#[test]
fn test_full_document_structure() {
    let file = parse(SHOP);
    assert_eq!(file.uri, URI);
    assert_eq!(file.language, "en");

    let feature = file.feature.expect("feature");
    assert_eq!(feature.keyword, "Feature");
    assert_eq!(feature.name, "Checkout");
    assert_eq!(feature.position, TextPosition::new(3, 1));
    assert_eq!(
        feature.description,
        "Buying things online.\nSecond description line."
    );

    let tags: Vec<_> = feature.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tags, vec!["checkout", "smoke"]);
    assert_eq!(feature.tags[1].position, TextPosition::new(2, 11));

    let background = feature.background.as_ref().expect("background");
    assert_eq!(background.steps.len(), 1);

    assert_eq!(feature.scenarios.len(), 2);
    assert_eq!(feature.rules.len(), 1);
}

#[test]
fn test_steps_tables_and_doc_strings() {
    let file = parse(SHOP);
    let feature = file.feature.unwrap();
    let scenario = &feature.scenarios[0];

    assert_eq!(scenario.name, "Pay by card");
    assert!(!scenario.is_outline());
    assert_eq!(scenario.steps.len(), 3);

    let when = &scenario.steps[1];
    assert_eq!(when.keyword, "When ");
    assert_eq!(when.keyword_type, StepKeywordType::Action);
    let table = when.data_table.as_ref().expect("table");
    assert_eq!(table.position, TextPosition::new(14, 7));
    assert_eq!(table.rows, vec![vec!["card", "amount"], vec!["visa", "10"]]);

    let then = &scenario.steps[2];
    let doc = then.doc_string.as_ref().expect("doc string");
    assert_eq!(doc.delimiter, "\"\"\"");
    assert_eq!(doc.content_type, "json");
    assert_eq!(doc.content, "{\"total\": 10}");
}

#[test]
fn test_outline_and_examples() {
    let file = parse(SHOP);
    let feature = file.feature.unwrap();
    let outline = &feature.scenarios[1];

    assert!(outline.is_outline());
    assert_eq!(outline.keyword, "Scenario Outline");
    assert_eq!(outline.tags[0].name, "outline");

    let kinds: Vec<_> = outline.steps.iter().map(|s| s.keyword_type).collect();
    assert_eq!(
        kinds,
        vec![
            StepKeywordType::Context,
            StepKeywordType::Unknown,
            StepKeywordType::Conjunction
        ]
    );

    let examples = &outline.examples[0];
    assert_eq!(examples.name.as_deref(), Some("Codes"));
    assert_eq!(examples.tags[0].name, "first");
    let table = examples.table.as_ref().expect("examples table");
    assert_eq!(table.header().unwrap(), &["code".to_string(), "price".to_string()]);
}

#[test]
fn test_rule_sections() {
    let file = parse(SHOP);
    let feature = file.feature.unwrap();
    let rule = &feature.rules[0];

    assert_eq!(rule.name, "Refunds");
    assert!(rule.background.is_some());
    assert_eq!(rule.scenarios.len(), 1);
    assert_eq!(rule.scenarios[0].keyword, "Example");
    assert_eq!(rule.scenarios[0].steps.len(), 2);
}

#[test]
fn test_comments_preserved_in_order() {
    let file = parse(SHOP);
    assert_eq!(file.comments.len(), 1);
    assert_eq!(file.comments[0].position, TextPosition::new(10, 3));
    assert_eq!(file.comments[0].text, "  # scenario comment");
}

#[test]
fn test_language_directive() {
    let file = parse("# language: fr\nFeature: Connexion\n");
    assert_eq!(file.language, "fr");
    assert_eq!(file.feature.unwrap().language, "fr");
    assert!(file.comments.is_empty());
}

#[test]
fn test_empty_input_has_no_feature() {
    let file = parse("");
    assert!(file.feature.is_none());
    assert_eq!(file.language, "en");
}

#[test]
fn test_syntax_error_keeps_comments() {
    let text = "# first\nFeature: Broken\n  Scenario: s\n    Given x\n    random prose\n# last\n";
    let file = parse(text);
    assert!(file.feature.is_none());
    assert_eq!(file.comments.len(), 2);
    assert_eq!(file.comments[1].position, TextPosition::new(6, 1));
}

#[test]
fn test_step_outside_scenario_is_structural_error() {
    let file = parse("Feature: f\n  Given orphan\n");
    assert!(file.feature.is_none());
}

#[test]
fn test_unterminated_doc_string() {
    let file = parse("Feature: f\n  Scenario: s\n    Given x\n      ```\n      open\n");
    assert!(file.feature.is_none());
}

#[test]
fn test_backtick_doc_string_preserves_fence() {
    let file = parse("Feature: f\n  Scenario: s\n    Given x\n      ```\n      body\n      ```\n");
    let feature = file.feature.unwrap();
    let doc = feature.scenarios[0].steps[0].doc_string.as_ref().unwrap();
    assert_eq!(doc.delimiter, "```");
    assert_eq!(doc.content_type, "");
    assert_eq!(doc.content, "body");
}

#[test]
fn test_second_feature_rejected() {
    let file = parse("Feature: one\nFeature: two\n");
    assert!(file.feature.is_none());
}

#[test]
fn test_dangling_tags_rejected() {
    let file = parse("Feature: f\n  Scenario: s\n    Given x\n  @orphan\n");
    assert!(file.feature.is_none());
}

#[test]
fn test_tag_names_never_carry_marker() {
    let file = parse("@a @b\nFeature: f\n  @c\n  Scenario: s\n    Given x\n");
    let feature = file.feature.unwrap();
    for tag in feature.tags.iter().chain(feature.scenarios[0].tags.iter()) {
        assert!(!tag.name.starts_with(TAG_MARKER));
    }
}

#[test]
fn test_unnamed_blocks() {
    let file = parse("Feature:\n  Scenario:\n    Given x\n");
    let feature = file.feature.unwrap();
    assert_eq!(feature.name, "");
    assert_eq!(feature.scenarios[0].name, "");
}

#[test]
fn test_byte_order_mark_ignored() {
    let file = parse("\u{feff}Feature: bom\n");
    assert_eq!(file.feature.unwrap().position, TextPosition::new(1, 1));
}

#[test]
fn test_background_after_scenario_rejected() {
    let file = parse("Feature: f\n  Scenario: s\n    Given x\n  Background:\n    Given y\n");
    assert!(file.feature.is_none());
}

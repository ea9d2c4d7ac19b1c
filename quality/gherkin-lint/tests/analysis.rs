//! End-to-end analysis through the real parser

use gherkin_lint::{
    export_descriptors, severity_of, Analyzer, Configuration, Severity, Settings, EXCLUDED_RULE,
};
use gherkin_parser::GherkinParser;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

const CHECKOUT: &str = "\
@checkout
Feature: Checkout

  Background:
    Given a catalogue

  Scenario: Pay by card
    Given a basket
    When the customer pays
    Then a receipt is shown

  Scenario Outline: Discounts
    Given code <code>
    Then price is <price>

    Examples:
      | code | price |
      | A    | 5     |
";

fn analyzer() -> Analyzer {
    Analyzer::new(Arc::new(GherkinParser::new()))
}

#[test]
fn test_clean_document_has_no_issues() {
    let issues = analyzer().analyze("file:///checkout.feature", CHECKOUT);
    assert!(issues.is_empty(), "{:?}", issues);
}

#[test]
fn test_unnamed_blocks_yield_error_diagnostics() {
    let engine = analyzer();
    let issues = engine.analyze("file:///u.feature", "Feature:\n  Scenario:\n    Given x\n");
    let errors: Vec<_> = issues
        .iter()
        .filter(|i| severity_of(i.rule_key) == Severity::Error)
        .map(|i| i.rule_key)
        .collect();
    assert_eq!(errors, vec!["feature-name-required", "scenario-name-required"]);
}

#[test]
fn test_issue_order_follows_registry_then_document() {
    let text = "#a\n@Bad\nFeature: f\n  Scenario: s\n    * x \n";
    let issues = analyzer().analyze("file:///o.feature", text);
    let keys: Vec<_> = issues.iter().map(|i| i.rule_key).collect();
    assert_eq!(
        keys,
        vec![
            "tag-name-convention",
            "star-step-prefix",
            "comment-convention",
            "trailing-whitespace"
        ]
    );
}

#[test]
fn test_settings_change_results() {
    let engine = analyzer();
    let settings = Settings::from_value(&json!({
        "rules": {
            "max-steps": {"max": "2"},
            "allowed-tags": {"enabled": true, "allowedTags": "smoke"},
            "spelling": {"enabled": true}
        }
    }));
    engine.reconfigure(Configuration::from_settings(Some(&settings)));

    let issues = engine.analyze("file:///checkout.feature", CHECKOUT);
    let keys: Vec<_> = issues.iter().map(|i| (i.rule_key, i.effective_line())).collect();
    assert_eq!(
        keys,
        vec![("max-steps", Some(7)), ("allowed-tags", Some(1))]
    );
    assert!(!engine.configuration().active_rule_keys().contains(EXCLUDED_RULE));
}

#[test]
fn test_cross_file_addresses_each_duplicate() {
    let engine = analyzer();
    engine.analyze("file:///a.feature", "Feature: Login\n  Scenario: ok\n    Given x\n");
    engine.analyze("file:///b.feature", "Feature: Login\n  Scenario: other\n    Given y\n");

    let findings = engine.analyze_cross_file();
    assert_eq!(findings.len(), 2);
    for uri in ["file:///a.feature", "file:///b.feature"] {
        let issues = &findings[uri];
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_key, "unique-feature-name");
        assert_eq!(issues[0].line, 1);
    }
}

#[test]
fn test_descriptor_export() {
    let exported = export_descriptors();
    assert_eq!(
        exported["max-scenarios"],
        json!({"enabled": true, "severity": "warning", "max": "20"})
    );
    assert_eq!(
        exported["tag-name-convention"]["format"],
        json!("^[a-z][-a-z0-9]*$")
    );
    assert!(exported.get(EXCLUDED_RULE).is_none());
}

//! Deterministic pre-order traversal of a document tree
//!
//! Order for one file:
//!
//! ```text
//! visit_feature_file
//!   visit_feature
//!     tags
//!     background, then its steps
//!     scenarios:  visit_scenario, tags, steps, (examples tags, visit_examples)*, leave_scenario
//!     rules:      visit_rule, tags, background + steps, scenarios, leave_rule
//!   leave_feature
//!   comments
//! leave_feature_file
//! ```

use crate::visitor::Visitor;
use gherkin_model::{BackgroundDefinition, FeatureFile, RuleDefinition, ScenarioDefinition, TagDefinition};

/// Walk `file`, calling `visitor` for every node in document order.
pub fn walk<V: Visitor + ?Sized>(file: &FeatureFile, visitor: &mut V) {
    visitor.visit_feature_file(file);

    if let Some(feature) = &file.feature {
        visitor.visit_feature(feature);
        walk_tags(&feature.tags, visitor);
        if let Some(background) = &feature.background {
            walk_background(background, visitor);
        }
        for scenario in &feature.scenarios {
            walk_scenario(scenario, visitor);
        }
        for rule in &feature.rules {
            walk_rule(rule, visitor);
        }
        visitor.leave_feature(feature);
    }

    for comment in &file.comments {
        visitor.visit_comment(comment);
    }

    visitor.leave_feature_file(file);
}

fn walk_tags<V: Visitor + ?Sized>(tags: &[TagDefinition], visitor: &mut V) {
    for tag in tags {
        visitor.visit_tag(tag);
    }
}

fn walk_background<V: Visitor + ?Sized>(background: &BackgroundDefinition, visitor: &mut V) {
    visitor.visit_background(background);
    for step in &background.steps {
        visitor.visit_step(step);
    }
}

fn walk_scenario<V: Visitor + ?Sized>(scenario: &ScenarioDefinition, visitor: &mut V) {
    visitor.visit_scenario(scenario);
    walk_tags(&scenario.tags, visitor);
    for step in &scenario.steps {
        visitor.visit_step(step);
    }
    for examples in &scenario.examples {
        walk_tags(&examples.tags, visitor);
        visitor.visit_examples(examples);
    }
    visitor.leave_scenario(scenario);
}

fn walk_rule<V: Visitor + ?Sized>(rule: &RuleDefinition, visitor: &mut V) {
    visitor.visit_rule(rule);
    walk_tags(&rule.tags, visitor);
    if let Some(background) = &rule.background {
        walk_background(background, visitor);
    }
    for scenario in &rule.scenarios {
        walk_scenario(scenario, visitor);
    }
    visitor.leave_rule(rule);
}

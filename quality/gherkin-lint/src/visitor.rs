//! Traversal callbacks
//!
//! Every callback defaults to a no-op, so a visitor only overrides the
//! node kinds it cares about. Container nodes (file, feature, rule,
//! scenario) get a matching `leave_*` call once their children are done.

use gherkin_model::{
    BackgroundDefinition, Comment, ExamplesDefinition, FeatureDefinition, FeatureFile,
    RuleDefinition, ScenarioDefinition, StepDefinition, TagDefinition,
};

#[allow(unused_variables)]
pub trait Visitor {
    fn visit_feature_file(&mut self, file: &FeatureFile) {}

    fn leave_feature_file(&mut self, file: &FeatureFile) {}

    fn visit_feature(&mut self, feature: &FeatureDefinition) {}

    fn leave_feature(&mut self, feature: &FeatureDefinition) {}

    fn visit_tag(&mut self, tag: &TagDefinition) {}

    fn visit_background(&mut self, background: &BackgroundDefinition) {}

    fn visit_scenario(&mut self, scenario: &ScenarioDefinition) {}

    fn leave_scenario(&mut self, scenario: &ScenarioDefinition) {}

    fn visit_step(&mut self, step: &StepDefinition) {}

    fn visit_examples(&mut self, examples: &ExamplesDefinition) {}

    fn visit_rule(&mut self, rule: &RuleDefinition) {}

    fn leave_rule(&mut self, rule: &RuleDefinition) {}

    fn visit_comment(&mut self, comment: &Comment) {}
}

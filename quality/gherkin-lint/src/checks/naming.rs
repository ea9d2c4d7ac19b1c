//! Name checks

use crate::check::{Check, CheckContext};
use crate::checks::limit;
use crate::error::RuleError;
use crate::properties::RuleProperties;
use gherkin_model::{
    BackgroundDefinition, FeatureDefinition, RuleDefinition, ScenarioDefinition, TextPosition,
};

#[derive(Debug, Default)]
pub struct FeatureNameRequired;

impl FeatureNameRequired {
    pub const KEY: &'static str = "feature-name-required";

    pub fn build(_: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self))
    }
}

impl Check for FeatureNameRequired {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_feature(&mut self, ctx: &mut CheckContext<'_>, feature: &FeatureDefinition) {
        if feature.name.trim().is_empty() {
            ctx.add_issue(feature.position, "Add a name to this feature.");
        }
    }
}

#[derive(Debug, Default)]
pub struct ScenarioNameRequired;

impl ScenarioNameRequired {
    pub const KEY: &'static str = "scenario-name-required";

    pub fn build(_: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self))
    }
}

impl Check for ScenarioNameRequired {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_scenario(&mut self, ctx: &mut CheckContext<'_>, scenario: &ScenarioDefinition) {
        if scenario.name.trim().is_empty() {
            ctx.add_issue(scenario.position, "Add a name to this scenario.");
        }
    }
}

/// Names of features, rules, backgrounds and scenarios stay readable
#[derive(Debug)]
pub struct NameLength {
    max_length: usize,
}

impl NameLength {
    pub const KEY: &'static str = "name-length";

    pub fn build(properties: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self {
            max_length: limit(properties, "maxLength")?,
        }))
    }

    fn check(&self, ctx: &mut CheckContext<'_>, position: TextPosition, name: &str) {
        let length = name.chars().count();
        if length > self.max_length {
            ctx.add_issue(
                position,
                format!(
                    "Shorten this name from {} to at most {} characters.",
                    length, self.max_length
                ),
            );
        }
    }
}

impl Check for NameLength {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_feature(&mut self, ctx: &mut CheckContext<'_>, feature: &FeatureDefinition) {
        self.check(ctx, feature.position, &feature.name);
    }

    fn visit_rule(&mut self, ctx: &mut CheckContext<'_>, rule: &RuleDefinition) {
        self.check(ctx, rule.position, &rule.name);
    }

    fn visit_background(&mut self, ctx: &mut CheckContext<'_>, background: &BackgroundDefinition) {
        self.check(ctx, background.position, &background.name);
    }

    fn visit_scenario(&mut self, ctx: &mut CheckContext<'_>, scenario: &ScenarioDefinition) {
        self.check(ctx, scenario.position, &scenario.name);
    }
}

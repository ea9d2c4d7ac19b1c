//! Size limits

use crate::check::{Check, CheckContext};
use crate::checks::limit;
use crate::error::RuleError;
use crate::properties::RuleProperties;
use gherkin_model::{BackgroundDefinition, FeatureDefinition, ScenarioDefinition};

/// Too many scenarios in one feature, rule sections included
#[derive(Debug)]
pub struct MaxScenarios {
    max: usize,
}

impl MaxScenarios {
    pub const KEY: &'static str = "max-scenarios";

    pub fn build(properties: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self {
            max: limit(properties, "max")?,
        }))
    }
}

impl Check for MaxScenarios {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_feature(&mut self, ctx: &mut CheckContext<'_>, feature: &FeatureDefinition) {
        let count = feature.all_scenarios().count();
        if count > self.max {
            ctx.add_issue_with_cost(
                feature.position,
                format!(
                    "Reduce the number of scenarios in this feature from {} to at most {}.",
                    count, self.max
                ),
                (count - self.max) as f64,
            );
        }
    }
}

/// Too many steps in one scenario or background
#[derive(Debug)]
pub struct MaxSteps {
    max: usize,
}

impl MaxSteps {
    pub const KEY: &'static str = "max-steps";

    pub fn build(properties: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self {
            max: limit(properties, "max")?,
        }))
    }

    fn check(&self, ctx: &mut CheckContext<'_>, position: gherkin_model::TextPosition, count: usize) {
        if count > self.max {
            ctx.add_issue_with_cost(
                position,
                format!(
                    "Reduce the number of steps from {} to at most {}.",
                    count, self.max
                ),
                (count - self.max) as f64,
            );
        }
    }
}

impl Check for MaxSteps {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_background(&mut self, ctx: &mut CheckContext<'_>, background: &BackgroundDefinition) {
        self.check(ctx, background.position, background.steps.len());
    }

    fn visit_scenario(&mut self, ctx: &mut CheckContext<'_>, scenario: &ScenarioDefinition) {
        self.check(ctx, scenario.position, scenario.steps.len());
    }
}

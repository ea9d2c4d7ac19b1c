//! Step keyword checks

use crate::check::{Check, CheckContext};
use crate::error::RuleError;
use crate::properties::RuleProperties;
use gherkin_model::{BackgroundDefinition, ScenarioDefinition, StepDefinition, StepKeywordType};

/// `* step` bullets hide the step type
#[derive(Debug, Default)]
pub struct StarStepPrefix;

impl StarStepPrefix {
    pub const KEY: &'static str = "star-step-prefix";

    pub fn build(_: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self))
    }
}

impl Check for StarStepPrefix {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_step(&mut self, ctx: &mut CheckContext<'_>, step: &StepDefinition) {
        if step.keyword_type != StepKeywordType::Unknown {
            return;
        }
        let keyword = step.trimmed_keyword();
        let start = step.position.column;
        let end = start + keyword.chars().count().saturating_sub(1) as u32;
        ctx.add_column_issue(
            start,
            end,
            step.position.line,
            "Replace the star prefix with Given, When, Then, And or But.",
        );
    }
}

/// `And`/`But` with no typed step before it in the same block
#[derive(Debug, Default)]
pub struct MissingStepType {
    typed_seen: bool,
}

impl MissingStepType {
    pub const KEY: &'static str = "missing-step-type";

    pub fn build(_: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self::default()))
    }
}

impl Check for MissingStepType {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_background(&mut self, _: &mut CheckContext<'_>, _: &BackgroundDefinition) {
        self.typed_seen = false;
    }

    fn visit_scenario(&mut self, _: &mut CheckContext<'_>, _: &ScenarioDefinition) {
        self.typed_seen = false;
    }

    fn visit_step(&mut self, ctx: &mut CheckContext<'_>, step: &StepDefinition) {
        match step.keyword_type {
            StepKeywordType::Context | StepKeywordType::Action | StepKeywordType::Outcome => {
                self.typed_seen = true;
            }
            StepKeywordType::Conjunction if !self.typed_seen => {
                ctx.add_issue(
                    step.position,
                    format!(
                        "Replace \"{}\" with Given, When or Then: no previous step sets the step type.",
                        step.trimmed_keyword()
                    ),
                );
            }
            _ => {}
        }
    }
}

//! Document structure checks

use crate::check::{Check, CheckContext};
use crate::error::RuleError;
use crate::properties::RuleProperties;
use gherkin_model::{ExamplesDefinition, FeatureFile, ScenarioDefinition};

/// Flags files without a valid Feature
#[derive(Debug, Default)]
pub struct FeatureFileRequired;

impl FeatureFileRequired {
    pub const KEY: &'static str = "feature-file-required";

    pub fn build(_: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self))
    }
}

impl Check for FeatureFileRequired {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_feature_file(&mut self, ctx: &mut CheckContext<'_>, file: &FeatureFile) {
        if !file.has_feature() {
            ctx.add_file_issue("Add a Feature to this file or fix its syntax errors.");
        }
    }
}

/// Outlines need examples, and examples need a header and data rows
#[derive(Debug, Default)]
pub struct ExamplesTableRequired;

impl ExamplesTableRequired {
    pub const KEY: &'static str = "examples-table-required";

    pub fn build(_: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self))
    }
}

impl Check for ExamplesTableRequired {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_scenario(&mut self, ctx: &mut CheckContext<'_>, scenario: &ScenarioDefinition) {
        let declared_outline =
            scenario.keyword.contains("Outline") || scenario.keyword.contains("Template");
        if declared_outline && !scenario.is_outline() {
            ctx.add_issue(scenario.position, "Add an Examples block to this scenario outline.");
        }
    }

    fn visit_examples(&mut self, ctx: &mut CheckContext<'_>, examples: &ExamplesDefinition) {
        let has_data = examples
            .table
            .as_ref()
            .is_some_and(|table| !table.body().is_empty());
        if !has_data {
            ctx.add_issue(
                examples.position,
                "Add a table with a header row and at least one data row.",
            );
        }
    }
}

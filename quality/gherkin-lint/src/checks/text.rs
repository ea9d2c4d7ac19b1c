//! Raw text checks
//!
//! These look at the document text rather than the tree, and report
//! nothing when the caller did not supply it.

use crate::check::{Check, CheckContext};
use crate::checks::limit;
use crate::error::RuleError;
use crate::properties::RuleProperties;
use gherkin_model::FeatureFile;

#[derive(Debug, Default)]
pub struct TrailingWhitespace;

impl TrailingWhitespace {
    pub const KEY: &'static str = "trailing-whitespace";

    pub fn build(_: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self))
    }
}

impl Check for TrailingWhitespace {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_feature_file(&mut self, ctx: &mut CheckContext<'_>, _: &FeatureFile) {
        let Some(text) = ctx.text() else {
            return;
        };
        for (index, line) in text.lines().enumerate() {
            if line.ends_with(char::is_whitespace) {
                ctx.add_line_issue(index as u32 + 1, "Remove the trailing whitespace.");
            }
        }
    }
}

#[derive(Debug)]
pub struct LineLength {
    max_length: usize,
}

impl LineLength {
    pub const KEY: &'static str = "line-length";

    pub fn build(properties: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self {
            max_length: limit(properties, "maxLength")?,
        }))
    }
}

impl Check for LineLength {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_feature_file(&mut self, ctx: &mut CheckContext<'_>, _: &FeatureFile) {
        let Some(text) = ctx.text() else {
            return;
        };
        for (index, line) in text.lines().enumerate() {
            let length = line.chars().count();
            if length > self.max_length {
                ctx.add_line_issue_with_cost(
                    index as u32 + 1,
                    format!(
                        "Split this line: it has {} characters, the limit is {}.",
                        length, self.max_length
                    ),
                    (length - self.max_length) as f64,
                );
            }
        }
    }
}

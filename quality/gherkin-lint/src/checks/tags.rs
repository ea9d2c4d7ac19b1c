//! Tag checks

use crate::check::{Check, CheckContext};
use crate::error::RuleError;
use crate::properties::RuleProperties;
use gherkin_model::TagDefinition;
use regex::Regex;
use std::collections::BTreeSet;

/// Tag names must match a configurable pattern
#[derive(Debug)]
pub struct TagNameConvention {
    format: Regex,
}

impl TagNameConvention {
    pub const KEY: &'static str = "tag-name-convention";

    pub fn build(properties: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self {
            format: properties.pattern("format")?.clone(),
        }))
    }
}

impl Check for TagNameConvention {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_tag(&mut self, ctx: &mut CheckContext<'_>, tag: &TagDefinition) {
        if self.format.is_match(&tag.name) {
            return;
        }
        // Range covers the marker and the name
        let start = tag.position.column;
        let end = start + tag.name.chars().count() as u32;
        ctx.add_column_issue(
            start,
            end,
            tag.position.line,
            format!(
                "Rename tag \"{}\" to match the regular expression: {}",
                tag.name,
                self.format.as_str()
            ),
        );
    }
}

/// Only tags from a comma-separated allow list may be used
#[derive(Debug)]
pub struct AllowedTags {
    allowed: BTreeSet<String>,
}

impl AllowedTags {
    pub const KEY: &'static str = "allowed-tags";

    pub fn build(properties: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        let allowed = properties
            .text("allowedTags")?
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| name.trim_start_matches('@').to_string())
            .collect();
        Ok(Box::new(Self { allowed }))
    }
}

impl Check for AllowedTags {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_tag(&mut self, ctx: &mut CheckContext<'_>, tag: &TagDefinition) {
        if !self.allowed.contains(&tag.name) {
            let allowed: Vec<&str> = self.allowed.iter().map(String::as_str).collect();
            ctx.add_issue(
                tag.position,
                format!(
                    "Remove the \"{}\" tag; allowed tags are: {}",
                    tag.name,
                    allowed.join(", ")
                ),
            );
        }
    }
}
